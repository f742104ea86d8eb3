pub mod curve;
pub mod key_pair;
pub mod keys;
