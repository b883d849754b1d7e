use error_stack::{Report, ResultExt};
use kernel::interface::security::PinHasher;
use kernel::prelude::entity::{Pin, PinDigest};
use kernel::KernelError;

pub const MIN_PIN_HASH_COST: u32 = 4;
pub const MAX_PIN_HASH_COST: u32 = 31;

/// Stores PINs as bcrypt hashes (`$2b$<cost>$<salt><hash>`).
#[derive(Debug, Clone, Copy)]
pub struct BcryptPinHasher {
    cost: u32,
}

impl BcryptPinHasher {
    pub fn new(cost: u32) -> error_stack::Result<Self, KernelError> {
        if !(MIN_PIN_HASH_COST..=MAX_PIN_HASH_COST).contains(&cost) {
            return Err(Report::new(KernelError::Internal).attach_printable(format!(
                "bcrypt cost must be within {MIN_PIN_HASH_COST}..={MAX_PIN_HASH_COST}, got {cost}"
            )));
        }
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPinHasher {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl PinHasher for BcryptPinHasher {
    fn hash(&self, pin: &Pin) -> error_stack::Result<PinDigest, KernelError> {
        let digest = bcrypt::hash(pin.as_ref().as_bytes(), self.cost)
            .change_context_lazy(|| KernelError::Internal)
            .attach_printable("Failed to hash pin")?;
        Ok(PinDigest::new(digest))
    }

    fn verify(&self, digest: &PinDigest, pin: &Pin) -> bool {
        let digest: &String = digest.as_ref();
        match bcrypt::verify(pin.as_ref().as_bytes(), digest) {
            Ok(matched) => matched,
            Err(error) => {
                tracing::warn!(%error, "stored pin digest is malformed");
                false
            }
        }
    }
}
