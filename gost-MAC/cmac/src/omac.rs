use cipher::{BlockCipher, BlockEncrypt};
use core::fmt;
use dbl::Dbl;
use digest::{
    block_buffer::Lazy,
    core_api::{
        AlgorithmName, Block, BlockSizeUser, Buffer, BufferKindUser, CoreWrapper, FixedOutputCore,
        UpdateCore,
    },
    crypto_common::{InnerInit, InnerUser},
    generic_array::{
        typenum::{IsLess, Le, NonZero, U256},
        ArrayLength, GenericArray,
    },
    MacMarker, Output, OutputSizeUser, Reset,
};

#[cfg(feature = "zeroize")]
use cipher::zeroize::{Zeroize, ZeroizeOnDrop};

/// GOST R 34.13-2015 MAC (OMAC1) over a 64- or 128-bit block cipher.
pub type Omac<C> = CoreWrapper<OmacCore<C>>;

/// CBC chain whose last block is masked with `K1` when full and with `K2`
/// after `10…0` padding otherwise. `K1 = dbl(E(0))`, `K2 = dbl(K1)`.
#[derive(Clone)]
pub struct OmacCore<C>
where
    C: BlockCipher + BlockEncrypt + Clone,
    Block<C>: Dbl,
{
    cipher: C,
    state: Block<C>,
}

impl<C> BlockSizeUser for OmacCore<C>
where
    C: BlockCipher + BlockEncrypt + Clone,
    Block<C>: Dbl,
{
    type BlockSize = C::BlockSize;
}

impl<C> OutputSizeUser for OmacCore<C>
where
    C: BlockCipher + BlockEncrypt + Clone,
    Block<C>: Dbl,
{
    type OutputSize = C::BlockSize;
}

impl<C> InnerUser for OmacCore<C>
where
    C: BlockCipher + BlockEncrypt + Clone,
    Block<C>: Dbl,
{
    type Inner = C;
}

impl<C> MacMarker for OmacCore<C>
where
    C: BlockCipher + BlockEncrypt + Clone,
    Block<C>: Dbl,
{
}

impl<C> InnerInit for OmacCore<C>
where
    C: BlockCipher + BlockEncrypt + Clone,
    Block<C>: Dbl,
{
    #[inline]
    fn inner_init(cipher: C) -> Self {
        Self {
            cipher,
            state: Default::default(),
        }
    }
}

impl<C> BufferKindUser for OmacCore<C>
where
    C: BlockCipher + BlockEncrypt + Clone,
    Block<C>: Dbl,
{
    type BufferKind = Lazy;
}

impl<C> UpdateCore for OmacCore<C>
where
    C: BlockCipher + BlockEncrypt + Clone,
    Block<C>: Dbl,
{
    #[inline]
    fn update_blocks(&mut self, blocks: &[Block<Self>]) {
        for block in blocks {
            xor(&mut self.state, block);
            self.cipher.encrypt_block(&mut self.state);
        }
    }
}

impl<C> Reset for OmacCore<C>
where
    C: BlockCipher + BlockEncrypt + Clone,
    Block<C>: Dbl,
{
    #[inline(always)]
    fn reset(&mut self) {
        self.state = Default::default();
    }
}

impl<C> FixedOutputCore for OmacCore<C>
where
    C: BlockCipher + BlockEncrypt + Clone,
    Block<C>: Dbl,
    C::BlockSize: IsLess<U256>,
    Le<C::BlockSize, U256>: NonZero,
{
    #[inline]
    fn finalize_fixed_core(&mut self, buffer: &mut Buffer<Self>, out: &mut Output<Self>) {
        let mut k1 = Block::<C>::default();
        self.cipher.encrypt_block(&mut k1);
        let k1 = k1.dbl();

        let pos = buffer.get_pos();
        let full = pos == buffer.size();
        let last = if full {
            buffer.pad_with_zeros()
        } else {
            let last = buffer.pad_with_zeros();
            last[pos] = 0x80;
            last
        };
        xor(&mut self.state, last);
        if full {
            xor(&mut self.state, &k1);
        } else {
            xor(&mut self.state, &k1.dbl());
        }
        self.cipher.encrypt_block(&mut self.state);
        out.copy_from_slice(&self.state);
    }
}

impl<C> AlgorithmName for OmacCore<C>
where
    C: BlockCipher + BlockEncrypt + Clone + AlgorithmName,
    Block<C>: Dbl,
{
    fn write_alg_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Omac<")?;
        <C as AlgorithmName>::write_alg_name(f)?;
        f.write_str(">")
    }
}

impl<C> fmt::Debug for OmacCore<C>
where
    C: BlockCipher + BlockEncrypt + Clone + AlgorithmName,
    Block<C>: Dbl,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OmacCore<")?;
        <C as AlgorithmName>::write_alg_name(f)?;
        f.write_str("> { ... }")
    }
}

#[cfg(feature = "zeroize")]
#[cfg_attr(docsrs, doc(cfg(feature = "zeroize")))]
impl<C> Drop for OmacCore<C>
where
    C: BlockCipher + BlockEncrypt + Clone,
    Block<C>: Dbl,
{
    fn drop(&mut self) {
        self.state.zeroize();
    }
}

#[cfg(feature = "zeroize")]
#[cfg_attr(docsrs, doc(cfg(feature = "zeroize")))]
impl<C> ZeroizeOnDrop for OmacCore<C>
where
    C: BlockCipher + BlockEncrypt + Clone + ZeroizeOnDrop,
    Block<C>: Dbl,
{
}

#[inline(always)]
fn xor<N: ArrayLength<u8>>(buf: &mut GenericArray<u8, N>, data: &GenericArray<u8, N>) {
    buf.iter_mut().zip(data.iter()).for_each(|(a, b)| *a ^= b);
}
