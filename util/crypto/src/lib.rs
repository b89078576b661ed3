//! Keys and signatures of the secp256k1 curve.

pub mod secp;
