//! Reversal of TIFF horizontal differencing
//!
//! Predictor 2 stores each sample as the difference from the previous sample
//! of the same channel in the row. Predictor 3 splits floating point samples
//! into byte planes (most significant first) and differences the bytes.
//! Both restart at the beginning of every row.

use log::{debug, trace};

use crate::io::byte_order::ByteOrder;
use crate::tiff::constants::{planar_config, predictor};
use crate::tiff::errors::{TiffError, TiffResult};

/// Value of the Predictor tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predictor {
    /// 1: samples stored as is
    None,
    /// 2: integer horizontal differencing
    Horizontal,
    /// 3: floating point horizontal differencing
    FloatingPoint,
}

impl Predictor {
    pub fn from_code(code: u16) -> TiffResult<Self> {
        match code {
            predictor::NONE => Ok(Predictor::None),
            predictor::HORIZONTAL_DIFFERENCING => Ok(Predictor::Horizontal),
            predictor::FLOATING_POINT => Ok(Predictor::FloatingPoint),
            other => Err(TiffError::UnsupportedPredictor(other)),
        }
    }

    pub fn code(&self) -> u16 {
        match self {
            Predictor::None => predictor::NONE,
            Predictor::Horizontal => predictor::HORIZONTAL_DIFFERENCING,
            Predictor::FloatingPoint => predictor::FLOATING_POINT,
        }
    }
}

/// Value of the PlanarConfiguration tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanarConfiguration {
    /// Channels interleaved per pixel
    Chunky,
    /// One plane per channel
    Planar,
}

impl PlanarConfiguration {
    pub fn from_code(code: u16) -> TiffResult<Self> {
        match code {
            planar_config::CHUNKY => Ok(PlanarConfiguration::Chunky),
            planar_config::PLANAR => Ok(PlanarConfiguration::Planar),
            other => Err(TiffError::UnsupportedPlanarConfiguration(other)),
        }
    }
}

/// Shape of the samples in one decompressed strip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleLayout {
    /// Pixels per row
    pub width: usize,
    /// Rows in the strip
    pub rows: usize,
    /// Bit depth of each channel
    pub bits_per_sample: Vec<u16>,
    pub planar: PlanarConfiguration,
    /// Byte order of multi-byte samples
    pub byte_order: ByteOrder,
}

impl SampleLayout {
    /// Channels interleaved within one row
    pub fn channels(&self) -> usize {
        match self.planar {
            PlanarConfiguration::Chunky => self.bits_per_sample.len(),
            PlanarConfiguration::Planar => 1,
        }
    }

    /// Shared sample width in bytes
    ///
    /// Every channel must use the same depth and that depth must be a whole
    /// number of bytes.
    pub fn bytes_per_sample(&self) -> TiffResult<usize> {
        let first = match self.bits_per_sample.first() {
            Some(&bits) => bits,
            None => return Err(TiffError::UnsupportedBitsPerSample("no bit depth given".to_string())),
        };

        if self.bits_per_sample.iter().any(|&bits| bits != first) {
            return Err(TiffError::UnsupportedBitsPerSample(format!(
                "mixed bit depths {:?}", self.bits_per_sample
            )));
        }
        if first == 0 || first % 8 != 0 {
            return Err(TiffError::UnsupportedBitsPerSample(format!(
                "{} bits is not a whole number of bytes", first
            )));
        }

        Ok(first as usize / 8)
    }

    /// Bytes in one row
    pub fn row_bytes(&self) -> TiffResult<usize> {
        let bytes_per_sample = self.bytes_per_sample()?;
        self.width
            .checked_mul(self.channels())
            .and_then(|samples| samples.checked_mul(bytes_per_sample))
            .ok_or_else(|| TiffError::MalformedDirectory(format!(
                "row of {} pixels with {} channels overflows", self.width, self.channels()
            )))
    }
}

/// Undoes the predictor on a decompressed strip
///
/// Only complete rows are returned; a short final strip keeps the rows that
/// are fully present.
///
/// # Arguments
/// * `data` - Decompressed strip bytes
/// * `layout` - Shape of the strip
/// * `predictor` - Predictor the strip was written with
///
/// # Returns
/// Samples in `layout.byte_order`
pub fn decode(mut data: Vec<u8>, layout: &SampleLayout, predictor: Predictor) -> TiffResult<Vec<u8>> {
    if predictor == Predictor::None {
        return Ok(data);
    }

    let bytes_per_sample = layout.bytes_per_sample()?;
    if predictor == Predictor::Horizontal && !matches!(bytes_per_sample, 1 | 2 | 4) {
        return Err(TiffError::UnsupportedSampleWidth(bytes_per_sample));
    }

    let channels = layout.channels();
    let row_bytes = layout.row_bytes()?;
    if row_bytes == 0 {
        return Ok(Vec::new());
    }

    let rows = layout.rows.min(data.len() / row_bytes);
    if rows < layout.rows {
        debug!("Strip holds {} of {} rows, decoding the complete ones", rows, layout.rows);
    }
    data.truncate(rows * row_bytes);
    trace!("Predictor {:?}: {} rows of {} bytes, {} channels", predictor, rows, row_bytes, channels);

    for row in data.chunks_exact_mut(row_bytes) {
        match predictor {
            Predictor::Horizontal => undo_integer_row(row, channels, bytes_per_sample, layout.byte_order)?,
            Predictor::FloatingPoint => undo_float_row(row, channels, bytes_per_sample, layout.byte_order),
            Predictor::None => {}
        }
    }

    Ok(data)
}

/// Running sum per channel with wraparound at the sample width
fn undo_integer_row(row: &mut [u8], channels: usize, bytes_per_sample: usize, byte_order: ByteOrder) -> TiffResult<()> {
    let h = byte_order.handler();
    let stride = channels * bytes_per_sample;

    match bytes_per_sample {
        1 => {
            for i in stride..row.len() {
                row[i] = row[i].wrapping_add(row[i - stride]);
            }
        }
        2 => {
            for i in (stride..row.len()).step_by(2) {
                let sum = h.read_u16(&row[i..]).wrapping_add(h.read_u16(&row[i - stride..]));
                h.write_u16(&mut row[i..], sum);
            }
        }
        4 => {
            for i in (stride..row.len()).step_by(4) {
                let sum = h.read_u32(&row[i..]).wrapping_add(h.read_u32(&row[i - stride..]));
                h.write_u32(&mut row[i..], sum);
            }
        }
        other => return Err(TiffError::UnsupportedSampleWidth(other)),
    }

    Ok(())
}

/// Byte-wise running sum followed by byte plane reassembly
fn undo_float_row(row: &mut [u8], channels: usize, bytes_per_sample: usize, byte_order: ByteOrder) {
    for i in channels..row.len() {
        row[i] = row[i].wrapping_add(row[i - channels]);
    }

    let planes = row.to_vec();
    let samples = row.len() / bytes_per_sample;

    for sample in 0..samples {
        for significance in 0..bytes_per_sample {
            let byte = planes[significance * samples + sample];
            let position = match byte_order {
                ByteOrder::BigEndian => significance,
                ByteOrder::LittleEndian => bytes_per_sample - 1 - significance,
            };
            row[sample * bytes_per_sample + position] = byte;
        }
    }
}
