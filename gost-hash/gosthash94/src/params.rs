use gost89::Sbox;

pub type Block = [u8; 32];

/// Parameter set of the hash: S-box and initial hash value.
pub trait Gost94Params: Clone {
    const NAME: &'static str;
    const S_BOX: Sbox;
    const H0: Block;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TestParams;

impl Gost94Params for TestParams {
    const NAME: &'static str = "Gost94Test";
    const S_BOX: Sbox = Sbox::DTest;
    const H0: Block = [0; 32];
}

#[derive(Clone, Copy, Debug, Default)]
pub struct CryptoProParams;

impl Gost94Params for CryptoProParams {
    const NAME: &'static str = "Gost94CryptoPro";
    const S_BOX: Sbox = Sbox::DA;
    const H0: Block = [0; 32];
}
