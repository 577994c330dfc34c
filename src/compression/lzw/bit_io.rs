//! MSB-first variable-width code packing

/// Pulls codes of a given width out of a byte slice
pub struct BitReader<'a> {
    data: &'a [u8],
    position: usize,
    residue: u32,
    bits: u32,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        BitReader {
            data,
            position: 0,
            residue: 0,
            bits: 0,
        }
    }

    /// Reads the next `width`-bit code, or `None` once the input runs out
    pub fn read_code(&mut self, width: u32) -> Option<u16> {
        while self.bits < width {
            let byte = *self.data.get(self.position)?;
            self.position += 1;
            self.residue = (self.residue << 8) | byte as u32;
            self.bits += 8;
        }

        self.bits -= width;
        let code = (self.residue >> self.bits) & ((1 << width) - 1);
        self.residue &= (1 << self.bits) - 1;
        Some(code as u16)
    }

    /// Bytes consumed so far
    pub fn position(&self) -> usize {
        self.position
    }
}

/// Packs codes of varying width into bytes
#[derive(Default)]
pub struct BitWriter {
    output: Vec<u8>,
    residue: u32,
    bits: u32,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        BitWriter {
            output: Vec::with_capacity(capacity),
            residue: 0,
            bits: 0,
        }
    }

    /// Appends `code` using its low `width` bits
    pub fn write_code(&mut self, code: u16, width: u32) {
        self.residue = (self.residue << width) | code as u32;
        self.bits += width;

        while self.bits >= 8 {
            self.bits -= 8;
            self.output.push((self.residue >> self.bits) as u8);
        }
        self.residue &= (1 << self.bits) - 1;
    }

    /// Whether every written bit has landed in a complete byte
    pub fn is_aligned(&self) -> bool {
        self.bits == 0
    }

    /// Returns the completed bytes; bits of an unfinished byte are dropped
    pub fn into_bytes(self) -> Vec<u8> {
        self.output
    }
}
