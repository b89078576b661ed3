use super::privkey::Privkey;
use super::pubkey::Pubkey;
use rand::{self, Rng};

/// Random key generator.
pub struct Generator;

impl Generator {
    /// Generates a random valid private key.
    pub fn random_privkey() -> Privkey {
        Self::random_keypair().0
    }

    /// Generates a random key pair.
    pub fn random_keypair() -> (Privkey, Pubkey) {
        let mut rng = rand::thread_rng();
        loop {
            let mut key = [0u8; 32];
            rng.fill(&mut key);
            let privkey = Privkey::from(key);
            // out of range keys are rejected when deriving the public key
            if let Ok(pubkey) = privkey.pubkey() {
                return (privkey, pubkey);
            }
        }
    }
}
