use crate::entity::{Pin, PinDigest};
use crate::KernelError;

pub trait PinHasher: 'static + Sync + Send {
    fn hash(&self, pin: &Pin) -> error_stack::Result<PinDigest, KernelError>;
    /// A malformed digest verifies as `false`.
    fn verify(&self, digest: &PinDigest, pin: &Pin) -> bool;
}

pub trait DependOnPinHasher: 'static + Sync + Send {
    type PinHasher: PinHasher;
    fn pin_hasher(&self) -> &Self::PinHasher;
}
