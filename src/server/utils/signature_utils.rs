use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// signs and checks the `auth` cookie the frontend hands out. both sides share the secret
pub struct SignatureUtil {
    secret: String,
}

impl SignatureUtil {
    pub fn new(secret: String) -> Self {
        Self { secret }
    }

    /// sig is hmac-sha256 over: username + expiry, keyed with the secret
    pub fn generate_signature(&self, username: &str, expiry: i64) -> String {
        let message = format!("{}{}", username, expiry);

        // hmac accepts keys of any length, new_from_slice can't fail here
        let mut mac = match HmacSha256::new_from_slice(self.secret.as_bytes()) {
            Ok(mac) => mac,
            Err(_) => return String::new(),
        };

        mac.update(message.as_bytes());

        hex::encode(mac.finalize().into_bytes())
    }

    pub fn verify_signature(&self, username: &str, expiry: i64, signature: &str) -> bool {
        if chrono::Utc::now().timestamp() > expiry {
            return false;
        }

        let expected_signature = self.generate_signature(username, expiry);

        // constant time compare so the signature can't be guessed byte by byte
        !expected_signature.is_empty()
            && signature.len() == expected_signature.len()
            && signature
                .as_bytes()
                .iter()
                .zip(expected_signature.as_bytes().iter())
                .fold(0, |acc, (a, b)| acc | (a ^ b))
                == 0
    }

    pub fn generate_expiry(hours: i64) -> i64 {
        chrono::Utc::now().timestamp() + (hours * 3600)
    }
}
