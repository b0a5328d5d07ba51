//! Gene codec: bit strings to direction codes.
//!
//! A genome is split into consecutive genes of `gene_length` bits. Each gene
//! is read as an unsigned binary number, most significant bit first.

use crate::schema::{ConfigError, MAX_GENE_LENGTH};

/// Validated gene width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneCodec {
    gene_length: usize,
}

impl GeneCodec {
    /// Create a codec for genes of `gene_length` bits.
    pub fn new(gene_length: usize) -> Result<Self, ConfigError> {
        if gene_length == 0 || gene_length > MAX_GENE_LENGTH {
            return Err(ConfigError::InvalidGeneLength(gene_length));
        }
        Ok(Self { gene_length })
    }

    #[inline]
    pub fn gene_length(&self) -> usize {
        self.gene_length
    }

    /// Lazily decode whole genes. Trailing bits that do not fill a gene are ignored.
    pub fn genes(self, bits: &[u8]) -> impl Iterator<Item = u32> + '_ {
        bits.chunks_exact(self.gene_length).map(gene_value)
    }

    /// Decode `bits`, rejecting lengths that are not a multiple of the gene width.
    pub fn decode(&self, bits: &[u8]) -> Result<Vec<u32>, ConfigError> {
        if bits.len() % self.gene_length != 0 {
            return Err(ConfigError::ChromosomeLengthMismatch {
                chromosome_length: bits.len(),
                gene_length: self.gene_length,
            });
        }
        Ok(self.genes(bits).collect())
    }
}

/// Decode a bit vector into direction codes.
pub fn decode(bits: &[u8], gene_length: usize) -> Result<Vec<u32>, ConfigError> {
    GeneCodec::new(gene_length)?.decode(bits)
}

#[inline]
fn gene_value(chunk: &[u8]) -> u32 {
    chunk
        .iter()
        .fold(0, |acc, &bit| (acc << 1) | u32::from(bit & 1))
}
