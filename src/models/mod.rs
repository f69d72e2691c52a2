pub mod hospital;
pub mod recipient;
