//! LZW encoder producing TIFF-compatible code streams
//!
//! The string table is a trie stored in three arrays indexed by code. A
//! node's children form a singly linked list: `first_child[code]` is the head
//! and `next_sibling[child]` the link, with 0 as the terminator (code 0 is a
//! root and can never be a child).

use log::trace;

use super::bit_io::BitWriter;
use super::{CLEAR_CODE, END_CODE, FIRST_FREE_CODE, MIN_CODE_WIDTH, RESET_AT_CODE, TABLE_SIZE};

/// Encodes one byte sequence into an LZW stream
pub struct LzwEncoder {
    first_child: Vec<u16>,
    child_byte: Vec<u8>,
    next_sibling: Vec<u16>,
    next_code: u16,
    width: u32,
    writer: BitWriter,
}

impl Default for LzwEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl LzwEncoder {
    pub fn new() -> Self {
        LzwEncoder {
            first_child: vec![0; TABLE_SIZE],
            child_byte: vec![0; TABLE_SIZE],
            next_sibling: vec![0; TABLE_SIZE],
            next_code: FIRST_FREE_CODE,
            width: MIN_CODE_WIDTH,
            writer: BitWriter::new(),
        }
    }

    fn reset_table(&mut self) {
        self.first_child.iter_mut().for_each(|c| *c = 0);
        self.next_code = FIRST_FREE_CODE;
        self.width = MIN_CODE_WIDTH;
    }

    fn find_child(&self, code: u16, byte: u8) -> Option<u16> {
        let mut child = self.first_child[code as usize];
        while child != 0 {
            if self.child_byte[child as usize] == byte {
                return Some(child);
            }
            child = self.next_sibling[child as usize];
        }
        None
    }

    fn add_child(&mut self, code: u16, byte: u8) {
        let child = self.next_code as usize;
        self.child_byte[child] = byte;
        self.next_sibling[child] = self.first_child[code as usize];
        self.first_child[code as usize] = self.next_code;
    }

    /// Moves to the next free code, growing the width or clearing the table
    ///
    /// The decoder learns each entry one code later than the encoder, so the
    /// encoder widens once its next code exceeds the current maximum rather
    /// than when it reaches it.
    fn advance(&mut self) {
        self.next_code += 1;

        if self.next_code == RESET_AT_CODE {
            trace!("LZW table full, emitting CLEAR");
            self.writer.write_code(CLEAR_CODE, self.width);
            self.reset_table();
        } else if self.next_code > (1 << self.width) - 1 {
            self.width += 1;
        }
    }

    /// Encodes `data`
    pub fn encode(mut self, data: &[u8]) -> Vec<u8> {
        self.writer = BitWriter::with_capacity(data.len() / 2 + 4);
        self.writer.write_code(CLEAR_CODE, self.width);

        let mut bytes = data.iter();
        if let Some(&first) = bytes.next() {
            let mut current = first as u16;

            for &byte in bytes {
                match self.find_child(current, byte) {
                    Some(extended) => current = extended,
                    None => {
                        self.writer.write_code(current, self.width);
                        self.add_child(current, byte);
                        self.advance();
                        current = byte as u16;
                    }
                }
            }

            self.writer.write_code(current, self.width);
            self.advance();
        }

        self.writer.write_code(END_CODE, self.width);
        if !self.writer.is_aligned() {
            self.writer.write_code(0, self.width);
        }

        self.writer.into_bytes()
    }
}
