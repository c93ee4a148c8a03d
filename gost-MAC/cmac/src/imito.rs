use core::fmt;
use digest::{
    block_buffer::Lazy,
    core_api::{
        AlgorithmName, Block, BlockSizeUser, Buffer, BufferKindUser, CoreWrapper, FixedOutputCore,
        UpdateCore,
    },
    crypto_common::{InnerInit, InnerUser},
    generic_array::GenericArray,
    typenum::U8,
    MacMarker, Output, OutputSizeUser, Reset,
};
use gost89::Gost89;

#[cfg(feature = "zeroize")]
use cipher::zeroize::{Zeroize, ZeroizeOnDrop};

/// GOST 28147-89 MAC over the full 64-bit register.
pub type Imito = CoreWrapper<ImitoCore>;

/// The message is zero-padded to whole blocks and an input of exactly one
/// block is followed by a zero block. The empty message authenticates as a
/// single zero block.
#[derive(Clone)]
pub struct ImitoCore {
    cipher: Gost89,
    iv: [u8; 8],
    state: [u8; 8],
    blocks: u64,
}

impl ImitoCore {
    /// Starts the register from `iv` instead of zero.
    pub fn with_iv(cipher: Gost89, iv: [u8; 8]) -> Self {
        Self {
            cipher,
            iv,
            state: iv,
            blocks: 0,
        }
    }

    #[inline(always)]
    fn absorb(&mut self, block: &[u8]) {
        self.state
            .iter_mut()
            .zip(block.iter())
            .for_each(|(s, b)| *s ^= b);
        self.cipher.mac_rounds(&mut self.state);
        self.blocks += 1;
    }
}

impl BlockSizeUser for ImitoCore {
    type BlockSize = U8;
}

impl OutputSizeUser for ImitoCore {
    type OutputSize = U8;
}

impl InnerUser for ImitoCore {
    type Inner = Gost89;
}

impl MacMarker for ImitoCore {}

impl InnerInit for ImitoCore {
    #[inline]
    fn inner_init(cipher: Gost89) -> Self {
        Self::with_iv(cipher, [0; 8])
    }
}

impl BufferKindUser for ImitoCore {
    type BufferKind = Lazy;
}

impl UpdateCore for ImitoCore {
    #[inline]
    fn update_blocks(&mut self, blocks: &[Block<Self>]) {
        for block in blocks {
            self.absorb(block);
        }
    }
}

impl Reset for ImitoCore {
    #[inline(always)]
    fn reset(&mut self) {
        self.state = self.iv;
        self.blocks = 0;
    }
}

impl FixedOutputCore for ImitoCore {
    #[inline]
    fn finalize_fixed_core(&mut self, buffer: &mut Buffer<Self>, out: &mut Output<Self>) {
        let pos = buffer.get_pos();
        let single_block = self.blocks == 0 && pos == 8;
        let last: GenericArray<u8, U8> = *buffer.pad_with_zeros();
        self.absorb(&last);
        if single_block {
            self.absorb(&[0; 8]);
        }
        out.copy_from_slice(&self.state);
    }
}

impl AlgorithmName for ImitoCore {
    fn write_alg_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Imito<GOST 28147-89>")
    }
}

impl fmt::Debug for ImitoCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ImitoCore { ... }")
    }
}

#[cfg(feature = "zeroize")]
#[cfg_attr(docsrs, doc(cfg(feature = "zeroize")))]
impl Drop for ImitoCore {
    fn drop(&mut self) {
        self.state.zeroize();
        self.iv.zeroize();
    }
}

#[cfg(feature = "zeroize")]
#[cfg_attr(docsrs, doc(cfg(feature = "zeroize")))]
impl ZeroizeOnDrop for ImitoCore {}
