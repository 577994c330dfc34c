//! Named image properties extracted from the flattened field set
//!
//! Extraction is forgiving: a field whose type does not match what the
//! property needs is logged, recorded in `failed_tags`, and left as `None`.

use std::collections::BTreeMap;

use log::{debug, warn};

use crate::compression::predictor::{PlanarConfiguration, SampleLayout};
use crate::io::byte_order::ByteOrder;
use crate::tiff::constants::{compression, planar_config, predictor, tags};
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::field::TypedField;
use crate::utils::tag_utils;

/// Image properties with TIFF defaults left unapplied
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageMetadata {
    pub subfile_type: Option<u64>,
    pub width: Option<u64>,
    pub height: Option<u64>,
    pub bits_per_sample: Option<Vec<u16>>,
    pub compression: Option<u16>,
    pub photometric: Option<u16>,
    pub fill_order: Option<u16>,
    pub image_description: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub strip_offsets: Option<Vec<u64>>,
    pub orientation: Option<u16>,
    pub samples_per_pixel: Option<u16>,
    pub rows_per_strip: Option<u64>,
    pub strip_byte_counts: Option<Vec<u64>>,
    pub min_sample_value: Option<Vec<u16>>,
    pub max_sample_value: Option<Vec<u16>>,
    pub x_resolution: Option<f64>,
    pub y_resolution: Option<f64>,
    pub planar_configuration: Option<u16>,
    pub resolution_unit: Option<u16>,
    pub software: Option<String>,
    pub date_time: Option<String>,
    pub artist: Option<String>,
    pub host_computer: Option<String>,
    pub predictor: Option<u16>,
    pub extra_samples: Option<Vec<u16>>,
    pub sample_format: Option<Vec<u16>>,
    pub copyright: Option<String>,
    pub model_pixel_scale: Option<Vec<f64>>,
    pub model_tiepoints: Option<Vec<f64>>,
    pub model_transformation: Option<Vec<f64>>,
    pub geo_key_directory: Option<Vec<u16>>,
    pub geo_double_params: Option<Vec<f64>>,
    pub geo_ascii_params: Option<String>,
    /// Tags whose value could not be read as the expected type
    pub failed_tags: Vec<u16>,
}

/// Turns a per-field result into an optional property, logging failures
fn capture<T>(failed: &mut Vec<u16>, field: &TypedField, result: TiffResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Failed to read tag {} ({}): {}", field.tag, tag_utils::get_tag_name(field.tag), e);
            failed.push(field.tag);
            None
        }
    }
}

impl ImageMetadata {
    /// Extracts every known property from the flattened field set
    pub fn extract(fields: &BTreeMap<u16, TypedField>) -> Self {
        let mut m = ImageMetadata::default();
        let mut failed = Vec::new();

        for field in fields.values() {
            let f = &mut failed;
            match field.tag {
                tags::NEW_SUBFILE_TYPE => m.subfile_type = capture(f, field, field.as_long()),
                tags::IMAGE_WIDTH => m.width = capture(f, field, field.as_long()),
                tags::IMAGE_LENGTH => m.height = capture(f, field, field.as_long()),
                tags::BITS_PER_SAMPLE => m.bits_per_sample = capture(f, field, field.as_shorts().map(<[u16]>::to_vec)),
                tags::COMPRESSION => m.compression = capture(f, field, field.as_short()),
                tags::PHOTOMETRIC_INTERPRETATION => m.photometric = capture(f, field, field.as_short()),
                tags::FILL_ORDER => m.fill_order = capture(f, field, field.as_short()),
                tags::IMAGE_DESCRIPTION => m.image_description = capture(f, field, field.as_ascii().map(str::to_string)),
                tags::MAKE => m.make = capture(f, field, field.as_ascii().map(str::to_string)),
                tags::MODEL => m.model = capture(f, field, field.as_ascii().map(str::to_string)),
                tags::STRIP_OFFSETS => m.strip_offsets = capture(f, field, field.as_longs()),
                tags::ORIENTATION => m.orientation = capture(f, field, field.as_short()),
                tags::SAMPLES_PER_PIXEL => m.samples_per_pixel = capture(f, field, field.as_short()),
                tags::ROWS_PER_STRIP => m.rows_per_strip = capture(f, field, field.as_long()),
                tags::STRIP_BYTE_COUNTS => m.strip_byte_counts = capture(f, field, field.as_longs()),
                tags::MIN_SAMPLE_VALUE => m.min_sample_value = capture(f, field, field.as_shorts().map(<[u16]>::to_vec)),
                tags::MAX_SAMPLE_VALUE => m.max_sample_value = capture(f, field, field.as_shorts().map(<[u16]>::to_vec)),
                tags::X_RESOLUTION => m.x_resolution = capture(f, field, field.as_rational()),
                tags::Y_RESOLUTION => m.y_resolution = capture(f, field, field.as_rational()),
                tags::PLANAR_CONFIGURATION => m.planar_configuration = capture(f, field, field.as_short()),
                tags::RESOLUTION_UNIT => m.resolution_unit = capture(f, field, field.as_short()),
                tags::SOFTWARE => m.software = capture(f, field, field.as_ascii().map(str::to_string)),
                tags::DATE_TIME => m.date_time = capture(f, field, field.as_ascii().map(str::to_string)),
                tags::ARTIST => m.artist = capture(f, field, field.as_ascii().map(str::to_string)),
                tags::HOST_COMPUTER => m.host_computer = capture(f, field, field.as_ascii().map(str::to_string)),
                tags::PREDICTOR => m.predictor = capture(f, field, field.as_short()),
                tags::EXTRA_SAMPLES => m.extra_samples = capture(f, field, field.as_shorts().map(<[u16]>::to_vec)),
                tags::SAMPLE_FORMAT => m.sample_format = capture(f, field, field.as_shorts().map(<[u16]>::to_vec)),
                tags::COPYRIGHT => m.copyright = capture(f, field, field.as_ascii().map(str::to_string)),
                tags::MODEL_PIXEL_SCALE_TAG => m.model_pixel_scale = capture(f, field, field.as_doubles().map(<[f64]>::to_vec)),
                tags::MODEL_TIEPOINT_TAG => m.model_tiepoints = capture(f, field, field.as_doubles().map(<[f64]>::to_vec)),
                tags::MODEL_TRANSFORMATION_TAG => m.model_transformation = capture(f, field, field.as_doubles().map(<[f64]>::to_vec)),
                tags::GEO_KEY_DIRECTORY_TAG => m.geo_key_directory = capture(f, field, field.as_shorts().map(<[u16]>::to_vec)),
                tags::GEO_DOUBLE_PARAMS_TAG => m.geo_double_params = capture(f, field, field.as_doubles().map(<[f64]>::to_vec)),
                tags::GEO_ASCII_PARAMS_TAG => m.geo_ascii_params = capture(f, field, field.as_ascii().map(str::to_string)),
                other => debug!("Skipping tag {} ({}) during metadata extraction",
                                other, tag_utils::get_tag_name(other)),
            }
        }

        m.failed_tags = failed;
        m
    }

    /// Image width and height
    pub fn dimensions(&self) -> TiffResult<(u64, u64)> {
        match (self.width, self.height) {
            (Some(w), Some(h)) => Ok((w, h)),
            _ => Err(TiffError::MissingDimensions),
        }
    }

    pub fn samples_per_pixel_or_default(&self) -> u16 {
        self.samples_per_pixel.unwrap_or(1)
    }

    /// Bit depth per channel, defaulting to 1 bit per sample
    pub fn bits_per_sample_or_default(&self) -> Vec<u16> {
        self.bits_per_sample.clone()
            .unwrap_or_else(|| vec![1; self.samples_per_pixel_or_default() as usize])
    }

    pub fn compression_or_default(&self) -> u16 {
        self.compression.unwrap_or(compression::NONE)
    }

    pub fn predictor_or_default(&self) -> u16 {
        self.predictor.unwrap_or(predictor::NONE)
    }

    pub fn planar_configuration_or_default(&self) -> u16 {
        self.planar_configuration.unwrap_or(planar_config::CHUNKY)
    }

    /// Rows per strip, clamped to the image height
    pub fn effective_rows_per_strip(&self) -> TiffResult<u64> {
        let (_, height) = self.dimensions()?;
        Ok(match self.rows_per_strip {
            Some(rows) if rows > 0 && rows < height => rows,
            _ => height,
        })
    }

    /// Number of strips holding one plane (or the whole image when chunky)
    pub fn strips_per_plane(&self) -> TiffResult<u64> {
        let (_, height) = self.dimensions()?;
        let rows = self.effective_rows_per_strip()?;
        if rows == 0 {
            return Ok(0);
        }
        Ok(height / rows + u64::from(height % rows != 0))
    }

    /// Number of strips listed in the file
    pub fn strip_count(&self) -> usize {
        self.strip_offsets.as_ref().map_or(0, Vec::len)
    }

    /// File offset and byte count of strip `index`
    pub fn strip_location(&self, index: usize) -> TiffResult<(u64, u64)> {
        let offsets = self.strip_offsets.as_ref().ok_or(TiffError::TagNotFound(tags::STRIP_OFFSETS))?;
        let counts = self.strip_byte_counts.as_ref().ok_or(TiffError::TagNotFound(tags::STRIP_BYTE_COUNTS))?;

        match (offsets.get(index), counts.get(index)) {
            (Some(&offset), Some(&count)) => Ok((offset, count)),
            _ => Err(TiffError::GenericError(format!(
                "Strip index {} out of range ({} offsets, {} byte counts)",
                index, offsets.len(), counts.len()
            ))),
        }
    }

    /// Rows actually present in strip `index`
    ///
    /// Every strip holds `rows_per_strip` rows except the last one of each
    /// plane, which holds whatever remains of the image height.
    pub fn rows_in_strip(&self, index: usize) -> TiffResult<u64> {
        let (_, height) = self.dimensions()?;
        let rows = self.effective_rows_per_strip()?;
        let per_plane = self.strips_per_plane()?;
        if per_plane == 0 {
            return Ok(0);
        }

        let first_row = (index as u64 % per_plane).saturating_mul(rows);
        Ok(rows.min(height.saturating_sub(first_row)))
    }

    /// Sample layout of strip `index`, ready for the predictor
    pub fn strip_layout(&self, index: usize, byte_order: ByteOrder) -> TiffResult<SampleLayout> {
        let (width, _) = self.dimensions()?;
        let planar = PlanarConfiguration::from_code(self.planar_configuration_or_default())?;

        let rows = self.rows_in_strip(index)?;

        Ok(SampleLayout {
            width: usize::try_from(width)
                .map_err(|_| TiffError::MalformedDirectory(format!("image width {} does not fit in memory", width)))?,
            rows: usize::try_from(rows)
                .map_err(|_| TiffError::MalformedDirectory(format!("{} rows per strip do not fit in memory", rows)))?,
            bits_per_sample: self.bits_per_sample_or_default(),
            planar,
            byte_order,
        })
    }
}
