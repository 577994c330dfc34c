//! LZW decoder for TIFF strips

use log::{trace, warn};

use super::bit_io::BitReader;
use super::{CLEAR_CODE, END_CODE, FIRST_FREE_CODE, MAX_CODE_WIDTH, MIN_CODE_WIDTH, TABLE_SIZE};
use crate::tiff::errors::{TiffError, TiffResult};

/// Decodes one LZW stream
///
/// A decoder is consumed by [`LzwDecoder::decode`]; every strip gets a new one.
pub struct LzwDecoder {
    table: Vec<Vec<u8>>,
    next_code: u16,
    width: u32,
    lenient_end_of_information: bool,
}

impl Default for LzwDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl LzwDecoder {
    pub fn new() -> Self {
        let mut decoder = LzwDecoder {
            table: Vec::with_capacity(TABLE_SIZE),
            next_code: FIRST_FREE_CODE,
            width: MIN_CODE_WIDTH,
            lenient_end_of_information: false,
        };
        decoder.reset();
        decoder
    }

    /// Accept a stream that stops without an END code
    pub fn lenient_end_of_information(mut self, lenient: bool) -> Self {
        self.lenient_end_of_information = lenient;
        self
    }

    /// Restores the 258 initial entries and the 9-bit width
    fn reset(&mut self) {
        self.table.clear();
        self.table.extend((0..=255u8).map(|b| vec![b]));
        // CLEAR and END occupy codes 256 and 257 but never expand to bytes
        self.table.push(Vec::new());
        self.table.push(Vec::new());
        self.next_code = FIRST_FREE_CODE;
        self.width = MIN_CODE_WIDTH;
    }

    /// Adds `previous + first` under the next free code and grows the width
    fn add_entry(&mut self, previous: u16, first: u8) {
        if self.table.len() >= TABLE_SIZE {
            return;
        }

        let mut entry = Vec::with_capacity(self.table[previous as usize].len() + 1);
        entry.extend_from_slice(&self.table[previous as usize]);
        entry.push(first);
        self.table.push(entry);
        self.next_code += 1;

        if self.next_code >= (1 << self.width) - 1 && self.width < MAX_CODE_WIDTH {
            self.width += 1;
            trace!("LZW code width grows to {} at code {}", self.width, self.next_code);
        }
    }

    /// Decodes a whole stream
    ///
    /// # Arguments
    /// * `data` - Compressed bytes
    ///
    /// # Returns
    /// The decoded bytes, `InvalidLzwCode` for a code outside the table, or
    /// `MissingEndOfInformation` when the input ends before END
    pub fn decode(mut self, data: &[u8]) -> TiffResult<Vec<u8>> {
        let mut reader = BitReader::new(data);
        let mut output = Vec::with_capacity(data.len() * 2);
        let mut previous: Option<u16> = None;

        loop {
            let code = match reader.read_code(self.width) {
                Some(code) => code,
                None if self.lenient_end_of_information => {
                    warn!("LZW stream ended without END after {} bytes, accepting", reader.position());
                    break;
                }
                None => return Err(TiffError::MissingEndOfInformation),
            };

            if code == CLEAR_CODE {
                self.reset();
                previous = None;
                continue;
            }
            if code == END_CODE {
                break;
            }

            let prev = match previous {
                Some(prev) => prev,
                None => {
                    // First code after CLEAR (or stream start) must be a literal
                    if code >= CLEAR_CODE {
                        return Err(TiffError::InvalidLzwCode { code, next_code: self.next_code });
                    }
                    output.push(code as u8);
                    previous = Some(code);
                    continue;
                }
            };

            let first = if (code as usize) < self.table.len() {
                let entry = &self.table[code as usize];
                output.extend_from_slice(entry);
                entry[0]
            } else if code == self.next_code {
                let start = output.len();
                let prev_entry = &self.table[prev as usize];
                output.extend_from_slice(prev_entry);
                output.push(prev_entry[0]);
                output[start]
            } else {
                return Err(TiffError::InvalidLzwCode { code, next_code: self.next_code });
            };

            self.add_entry(prev, first);
            previous = Some(code);
        }

        Ok(output)
    }
}
