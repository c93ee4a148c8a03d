//! Block chaining over a [`BlockCore`] with optional key meshing.
//!
//! CBC, CFB and OFB take the GOST R 34.13-2015 shift register: the IV may be
//! any positive multiple of the block size and block `i` is chained with
//! register slot `i mod z`.

use crate::{
    backend::{BlockCore, Version},
    flavors::Counter,
    meshing::{KeyMeshing, Mesher},
};
use core::{fmt, str::FromStr};
use gost_common::{Error, Result};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlockMode {
    #[default]
    Ecb,
    Cbc,
    Cfb,
    Ofb,
    Ctr,
}

impl BlockMode {
    pub fn name(self) -> &'static str {
        match self {
            Self::Ecb => "ECB",
            Self::Cbc => "CBC",
            Self::Cfb => "CFB",
            Self::Ofb => "OFB",
            Self::Ctr => "CTR",
        }
    }

    /// Modes that need the input padded to whole blocks.
    pub fn is_block_aligned(self) -> bool {
        matches!(self, Self::Ecb | Self::Cbc)
    }
}

impl FromStr for BlockMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "ECB" => Ok(Self::Ecb),
            "CBC" => Ok(Self::Cbc),
            "CFB" => Ok(Self::Cfb),
            "OFB" => Ok(Self::Ofb),
            "CTR" | "CNT" => Ok(Self::Ctr),
            _ => Err(Error::syntax(format!("unknown block mode {}", s))),
        }
    }
}

impl fmt::Display for BlockMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shift register of `z` blocks; the front slot feeds the next block.
struct Register {
    bytes: Vec<u8>,
    n: usize,
}

impl Register {
    fn new(iv: &[u8], n: usize) -> Result<Self> {
        if iv.is_empty() || iv.len() % n != 0 {
            return Err(Error::data(format!(
                "IV length {} is not a positive multiple of {}",
                iv.len(),
                n
            )));
        }
        Ok(Self {
            bytes: iv.to_vec(),
            n,
        })
    }

    fn front(&mut self) -> &mut [u8] {
        &mut self.bytes[..self.n]
    }

    fn push(&mut self, block: &[u8]) {
        let n = self.n;
        self.bytes.rotate_left(n);
        let len = self.bytes.len();
        self.bytes[len - n..].copy_from_slice(block);
    }
}

/// One encryption or decryption pass; consumed by the call that runs it.
pub struct Chain {
    core: BlockCore,
    mesher: Mesher,
}

impl Chain {
    pub fn new(core: BlockCore, meshing: KeyMeshing) -> Self {
        Self {
            core,
            mesher: Mesher::new(meshing),
        }
    }

    pub fn block_size(&self) -> usize {
        self.core.block_size()
    }

    fn check_aligned(&self, data: &[u8]) -> Result<()> {
        if data.len() % self.block_size() != 0 {
            return Err(Error::data(format!(
                "data length {} is not a multiple of the block size",
                data.len()
            )));
        }
        Ok(())
    }

    /// Accounts for the next block, re-encrypting `register` if the key was
    /// just meshed.
    fn step(&mut self, register: Option<&mut Register>, len: usize) -> Result<()> {
        if self.mesher.advance(&mut self.core, len)? {
            if let Some(reg) = register {
                let core = &self.core;
                core.encrypt_block(reg.front());
            }
        }
        Ok(())
    }

    pub fn ecb_encrypt(mut self, data: &mut [u8]) -> Result<()> {
        self.check_aligned(data)?;
        let n = self.block_size();
        for block in data.chunks_exact_mut(n) {
            self.step(None, n)?;
            self.core.encrypt_block(block);
        }
        Ok(())
    }

    pub fn ecb_decrypt(mut self, data: &mut [u8]) -> Result<()> {
        self.check_aligned(data)?;
        let n = self.block_size();
        for block in data.chunks_exact_mut(n) {
            self.step(None, n)?;
            self.core.decrypt_block(block);
        }
        Ok(())
    }

    pub fn cbc_encrypt(mut self, iv: &[u8], data: &mut [u8]) -> Result<()> {
        self.check_aligned(data)?;
        let n = self.block_size();
        let mut reg = Register::new(iv, n)?;
        for block in data.chunks_exact_mut(n) {
            self.step(Some(&mut reg), n)?;
            xor(block, reg.front());
            self.core.encrypt_block(block);
            reg.push(block);
        }
        Ok(())
    }

    pub fn cbc_decrypt(mut self, iv: &[u8], data: &mut [u8]) -> Result<()> {
        self.check_aligned(data)?;
        let n = self.block_size();
        let mut reg = Register::new(iv, n)?;
        let mut saved = vec![0u8; n];
        for block in data.chunks_exact_mut(n) {
            self.step(Some(&mut reg), n)?;
            saved.copy_from_slice(block);
            self.core.decrypt_block(block);
            xor(block, reg.front());
            reg.push(&saved);
        }
        Ok(())
    }

    pub fn cfb_encrypt(self, iv: &[u8], data: &mut [u8]) -> Result<()> {
        self.cfb(iv, data, false)
    }

    pub fn cfb_decrypt(self, iv: &[u8], data: &mut [u8]) -> Result<()> {
        self.cfb(iv, data, true)
    }

    fn cfb(mut self, iv: &[u8], data: &mut [u8], decrypt: bool) -> Result<()> {
        let n = self.block_size();
        let mut reg = Register::new(iv, n)?;
        let mut gamma = vec![0u8; n];
        for chunk in data.chunks_mut(n) {
            self.step(Some(&mut reg), chunk.len())?;
            gamma.copy_from_slice(reg.front());
            self.core.encrypt_block(&mut gamma);
            if decrypt {
                let saved = chunk.to_vec();
                xor(chunk, &gamma);
                if saved.len() == n {
                    reg.push(&saved);
                }
            } else {
                xor(chunk, &gamma);
                if chunk.len() == n {
                    reg.push(chunk);
                }
            }
        }
        Ok(())
    }

    /// OFB is its own inverse.
    pub fn ofb(mut self, iv: &[u8], data: &mut [u8]) -> Result<()> {
        let n = self.block_size();
        let mut reg = Register::new(iv, n)?;
        let mut gamma = vec![0u8; n];
        for chunk in data.chunks_mut(n) {
            self.step(Some(&mut reg), chunk.len())?;
            gamma.copy_from_slice(reg.front());
            self.core.encrypt_block(&mut gamma);
            xor(chunk, &gamma);
            reg.push(&gamma);
        }
        Ok(())
    }

    /// CTR is its own inverse; the counter flavor follows `version`.
    pub fn ctr(mut self, version: Version, iv: &[u8], data: &mut [u8]) -> Result<()> {
        let n = self.block_size();
        let mut counter = Counter::new(version, &self.core, iv)?;
        let mut gamma = vec![0u8; n];
        for chunk in data.chunks_mut(n) {
            if self.mesher.advance(&mut self.core, chunk.len())? {
                counter.reencrypt(&self.core);
            }
            counter.next_block(&mut gamma);
            self.core.encrypt_block(&mut gamma);
            xor(chunk, &gamma);
        }
        Ok(())
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("core", &self.core)
            .field("mesher", &self.mesher)
            .finish()
    }
}

/// XORs `src` into the prefix of `dst` or the whole of it, whichever is
/// shorter.
fn xor(dst: &mut [u8], src: &[u8]) {
    dst.iter_mut().zip(src.iter()).for_each(|(a, b)| *a ^= b);
}

#[cfg(test)]
mod tests {
    use super::*;
    use gost89::Sbox;
    use hex_literal::hex;

    const KUZ_KEY: [u8; 32] =
        hex!("8899aabbccddeeff0011223344556677fedcba98765432100123456789abcdef");
    const KUZ_PT: [u8; 64] = hex!(
        "1122334455667700ffeeddccbbaa9988"
        "00112233445566778899aabbcceeff0a"
        "112233445566778899aabbcceeff0a00"
        "2233445566778899aabbcceeff0a0011"
    );
    const KUZ_IV: [u8; 32] =
        hex!("1234567890abcef0a1b2c3d4e5f0011223344556677889901213141516171819");

    const MAGMA_KEY: [u8; 32] =
        hex!("ffeeddccbbaa99887766554433221100f0f1f2f3f4f5f6f7f8f9fafbfcfdfeff");
    const MAGMA_PT: [u8; 32] = hex!(
        "92def06b3c130a59" "db54c704f8189d20" "4a98fb2e67a8024c" "8912409b17b57e41"
    );

    fn kuz() -> Chain {
        let core = BlockCore::new(Version::Gost2015, 128, &KUZ_KEY, &Sbox::EZ).unwrap();
        Chain::new(core, KeyMeshing::No)
    }

    fn magma() -> Chain {
        let core = BlockCore::new(Version::Gost2015, 64, &MAGMA_KEY, &Sbox::EZ).unwrap();
        Chain::new(core, KeyMeshing::No)
    }

    #[test]
    fn kuznyechik_ecb() {
        let mut buf = KUZ_PT;
        kuz().ecb_encrypt(&mut buf).unwrap();
        assert_eq!(
            buf,
            hex!(
                "7f679d90bebc24305a468d42b9d4edcd"
                "b429912c6e0032f9285452d76718d08b"
                "f0ca33549d247ceef3f5a5313bd4b157"
                "d0b09ccde830b9eb3a02c4c5aa8ada98"
            )
        );
        kuz().ecb_decrypt(&mut buf).unwrap();
        assert_eq!(buf, KUZ_PT);
    }

    #[test]
    fn kuznyechik_ctr() {
        let mut buf = KUZ_PT;
        kuz().ctr(Version::Gost2015, &hex!("1234567890abcef0"), &mut buf).unwrap();
        assert_eq!(
            buf,
            hex!(
                "f195d8bec10ed1dbd57b5fa240bda1b8"
                "85eee733f6a13e5df33ce4b33c45dee4"
                "a5eae88be6356ed3d5e877f13564a3a5"
                "cb91fab1f20cbab6d1c6d15820bdba73"
            )
        );
    }

    #[test]
    fn kuznyechik_cbc_with_two_block_register() {
        let mut buf = KUZ_PT;
        kuz().cbc_encrypt(&KUZ_IV, &mut buf).unwrap();
        assert_eq!(
            buf,
            hex!(
                "689972d4a085fa4d90e52e3d6d7dcc27"
                "2826e661b478eca6af1e8e448d5ea5ac"
                "fe7babf1e91999e85640e8b0f49d90d0"
                "167688065a895c631a2d9a1560b63970"
            )
        );
        kuz().cbc_decrypt(&KUZ_IV, &mut buf).unwrap();
        assert_eq!(buf, KUZ_PT);
    }

    #[test]
    fn kuznyechik_ofb_and_cfb() {
        let mut buf = KUZ_PT;
        kuz().ofb(&KUZ_IV, &mut buf).unwrap();
        assert_eq!(
            buf,
            hex!(
                "81800a59b1842b24ff1f795e897abd95"
                "ed5b47a7048cfab48fb521369d9326bf"
                "66a257ac3ca0b8b1c80fe7fc10288a13"
                "203ebbc066138660a0292243f6903150"
            )
        );
        let mut buf = KUZ_PT;
        kuz().cfb_encrypt(&KUZ_IV, &mut buf).unwrap();
        assert_eq!(
            buf,
            hex!(
                "81800a59b1842b24ff1f795e897abd95"
                "ed5b47a7048cfab48fb521369d9326bf"
                "79f2a8eb5cc68d38842d264e97a238b5"
                "4ffebecd4e922de6c75bd9dd44fbf4d1"
            )
        );
        kuz().cfb_decrypt(&KUZ_IV, &mut buf).unwrap();
        assert_eq!(buf, KUZ_PT);
    }

    #[test]
    fn magma_reference_modes() {
        let mut buf = MAGMA_PT;
        magma().ecb_encrypt(&mut buf).unwrap();
        assert_eq!(
            buf,
            hex!("2b073f0494f372a0" "de70e715d3556e48" "11d8d9e9eacfbc1e" "7c68260996c67efb")
        );

        let mut buf = MAGMA_PT;
        magma().ctr(Version::Gost2015, &hex!("12345678"), &mut buf).unwrap();
        assert_eq!(
            buf,
            hex!("4e98110c97b7b93c" "3e250d93d6e85d69" "136d868807b2dbef" "568eb680ab52a12d")
        );

        let mut buf = MAGMA_PT;
        let iv = hex!("1234567890abcdef234567890abcdef134567890abcdef12");
        magma().cbc_encrypt(&iv, &mut buf).unwrap();
        assert_eq!(
            buf,
            hex!("96d1b05eea683919" "aff76129abb937b9" "5058b4a1c4bc0019" "20b78b1a7cd7e667")
        );

        let iv = hex!("1234567890abcdef234567890abcdef1");
        let mut buf = MAGMA_PT;
        magma().ofb(&iv, &mut buf).unwrap();
        assert_eq!(
            buf,
            hex!("db37e0e266903c83" "0d46644c1f9a089c" "a0f83062430e327e" "c824efb8bd4fdb05")
        );
        let mut buf = MAGMA_PT;
        magma().cfb_encrypt(&iv, &mut buf).unwrap();
        assert_eq!(
            buf,
            hex!("db37e0e266903c83" "0d46644c1f9a089c" "24bdd2035315d38b" "bcc0321421075505")
        );
    }

    #[test]
    fn stream_modes_truncate_last_gamma() {
        let iv = hex!("1234567890abcdef234567890abcdef1");
        let mut full = MAGMA_PT;
        magma().cfb_encrypt(&iv, &mut full).unwrap();
        let mut short = MAGMA_PT[..29].to_vec();
        magma().cfb_encrypt(&iv, &mut short).unwrap();
        assert_eq!(short, full[..29]);
        magma().cfb_decrypt(&iv, &mut short).unwrap();
        assert_eq!(short, MAGMA_PT[..29]);
    }

    #[test]
    fn gost89_ctr_gamma_is_ecb_of_stepped_counter() {
        let key = [0x42u8; 32];
        let iv = hex!("0102030405060708");
        let core = BlockCore::new(Version::Gost1989, 64, &key, &Sbox::EA).unwrap();

        let mut s = iv;
        core.encrypt_block(&mut s);
        let n1 = u32::from_le_bytes([s[0], s[1], s[2], s[3]]).wrapping_add(0x0101_0101);
        let n2 = u32::from_le_bytes([s[4], s[5], s[6], s[7]]);
        let n2 = ((n2 as u64 + 0x0101_0104) % 0xffff_ffff) as u32;
        let mut gamma = [0u8; 8];
        gamma[..4].copy_from_slice(&n1.to_le_bytes());
        gamma[4..].copy_from_slice(&n2.to_le_bytes());
        core.encrypt_block(&mut gamma);

        let mut buf = [0u8; 8];
        Chain::new(core, KeyMeshing::No)
            .ctr(Version::Gost1989, &iv, &mut buf)
            .unwrap();
        assert_eq!(buf, gamma);
    }

    #[test]
    fn meshing_changes_only_data_past_first_interval() {
        let key = [0x17u8; 32];
        let iv = [0u8; 8];
        let data: Vec<u8> = (0..3000u32).map(|i| i as u8).collect();
        let chain = |meshing| {
            let core = BlockCore::new(Version::Gost1989, 64, &key, &Sbox::EA).unwrap();
            Chain::new(core, meshing)
        };
        for mode in [BlockMode::Cfb, BlockMode::Ofb, BlockMode::Ctr] {
            let run = |meshing, decrypt: bool, buf: &mut [u8]| match mode {
                BlockMode::Cfb if decrypt => chain(meshing).cfb_decrypt(&iv, buf),
                BlockMode::Cfb => chain(meshing).cfb_encrypt(&iv, buf),
                BlockMode::Ofb => chain(meshing).ofb(&iv, buf),
                _ => chain(meshing).ctr(Version::Gost1989, &iv, buf),
            };
            let mut plain = data.clone();
            run(KeyMeshing::No, false, &mut plain).unwrap();
            let mut meshed = data.clone();
            run(KeyMeshing::CryptoPro, false, &mut meshed).unwrap();
            assert_eq!(plain[..1024], meshed[..1024], "{}", mode);
            assert_ne!(plain[1024..1032], meshed[1024..1032], "{}", mode);
            run(KeyMeshing::CryptoPro, true, &mut meshed).unwrap();
            assert_eq!(meshed, data, "{}", mode);
        }
    }

    #[test]
    fn meshed_block_modes_round_trip() {
        let key = [0x33u8; 32];
        let iv = [9u8; 16];
        let data: Vec<u8> = (0..2048u32).map(|i| (i * 7) as u8).collect();
        let core = || BlockCore::new(Version::Gost1989, 64, &key, &Sbox::EA).unwrap();

        let mut buf = data.clone();
        Chain::new(core(), KeyMeshing::CryptoPro).cbc_encrypt(&iv, &mut buf).unwrap();
        Chain::new(core(), KeyMeshing::CryptoPro).cbc_decrypt(&iv, &mut buf).unwrap();
        assert_eq!(buf, data);

        let mut buf = data.clone();
        Chain::new(core(), KeyMeshing::CryptoPro).ecb_encrypt(&mut buf).unwrap();
        Chain::new(core(), KeyMeshing::CryptoPro).ecb_decrypt(&mut buf).unwrap();
        assert_eq!(buf, data);
    }

    #[test]
    fn rejects_bad_iv_and_alignment() {
        assert!(matches!(kuz().cbc_encrypt(&[0; 24], &mut [0; 16]), Err(Error::Data(_))));
        assert!(matches!(kuz().ofb(&[], &mut [0; 16]), Err(Error::Data(_))));
        assert!(matches!(kuz().ecb_encrypt(&mut [0; 15]), Err(Error::Data(_))));
    }
}
