//! TIFF tag utilities
//!
//! Static name tables for diagnostic output. Unknown values map to "Unknown".

use crate::tiff::constants::{compression, field_types, photometric, planar_config, predictor, tags};
use crate::tiff::field::TypedField;

/// Get the name of a TIFF tag
///
/// # Arguments
/// * `tag` - The tag ID to look up
///
/// # Returns
/// A string representing the tag name
pub fn get_tag_name(tag: u16) -> &'static str {
    match tag {
        // Basic image structure tags
        tags::NEW_SUBFILE_TYPE => "NewSubfileType",
        tags::IMAGE_WIDTH => "ImageWidth",
        tags::IMAGE_LENGTH => "ImageLength",
        tags::BITS_PER_SAMPLE => "BitsPerSample",
        tags::COMPRESSION => "Compression",
        tags::PHOTOMETRIC_INTERPRETATION => "PhotometricInterpretation",
        tags::FILL_ORDER => "FillOrder",
        tags::IMAGE_DESCRIPTION => "ImageDescription",
        tags::MAKE => "Make",
        tags::MODEL => "Model",
        tags::STRIP_OFFSETS => "StripOffsets",
        tags::ORIENTATION => "Orientation",
        tags::SAMPLES_PER_PIXEL => "SamplesPerPixel",
        tags::ROWS_PER_STRIP => "RowsPerStrip",
        tags::STRIP_BYTE_COUNTS => "StripByteCounts",
        tags::MIN_SAMPLE_VALUE => "MinSampleValue",
        tags::MAX_SAMPLE_VALUE => "MaxSampleValue",
        tags::X_RESOLUTION => "XResolution",
        tags::Y_RESOLUTION => "YResolution",
        tags::PLANAR_CONFIGURATION => "PlanarConfiguration",
        tags::RESOLUTION_UNIT => "ResolutionUnit",
        tags::SOFTWARE => "Software",
        tags::DATE_TIME => "DateTime",
        tags::ARTIST => "Artist",
        tags::HOST_COMPUTER => "HostComputer",
        tags::PREDICTOR => "Predictor",
        tags::COLOR_MAP => "ColorMap",
        tags::TILE_WIDTH => "TileWidth",
        tags::TILE_LENGTH => "TileLength",
        tags::TILE_OFFSETS => "TileOffsets",
        tags::TILE_BYTE_COUNTS => "TileByteCounts",
        tags::EXTRA_SAMPLES => "ExtraSamples",
        tags::SAMPLE_FORMAT => "SampleFormat",
        tags::COPYRIGHT => "Copyright",

        // GeoTIFF tags
        tags::MODEL_PIXEL_SCALE_TAG => "ModelPixelScale",
        tags::MODEL_TIEPOINT_TAG => "ModelTiepoint",
        tags::MODEL_TRANSFORMATION_TAG => "ModelTransformation",
        tags::GEO_KEY_DIRECTORY_TAG => "GeoKeyDirectory",
        tags::GEO_DOUBLE_PARAMS_TAG => "GeoDoubleParams",
        tags::GEO_ASCII_PARAMS_TAG => "GeoAsciiParams",

        _ => "Unknown",
    }
}

/// Get the name of a TIFF field type
pub fn get_field_type_name(field_type: u16) -> &'static str {
    match field_type {
        field_types::BYTE => "BYTE",
        field_types::ASCII => "ASCII",
        field_types::SHORT => "SHORT",
        field_types::LONG => "LONG",
        field_types::RATIONAL => "RATIONAL",
        field_types::SBYTE => "SBYTE",
        field_types::UNDEFINED => "UNDEFINED",
        field_types::SSHORT => "SSHORT",
        field_types::SLONG => "SLONG",
        field_types::SRATIONAL => "SRATIONAL",
        field_types::FLOAT => "FLOAT",
        field_types::DOUBLE => "DOUBLE",
        field_types::LONG8 => "LONG8",
        field_types::SLONG8 => "SLONG8",
        field_types::IFD8 => "IFD8",
        _ => "Unknown",
    }
}

/// Get the name of a compression method
pub fn get_compression_name(compression_code: u64) -> &'static str {
    match u16::try_from(compression_code) {
        Ok(compression::NONE) => "None",
        Ok(compression::CCITT_RLE) => "CCITT RLE",
        Ok(compression::CCITT_FAX3) => "CCITT Group 3 Fax",
        Ok(compression::CCITT_FAX4) => "CCITT Group 4 Fax",
        Ok(compression::LZW) => "LZW",
        Ok(compression::JPEG_OLD) => "Old JPEG",
        Ok(compression::JPEG) => "JPEG",
        Ok(compression::DEFLATE) => "Adobe Deflate",
        Ok(compression::ZSTD) => "Zstandard",
        Ok(compression::PACKBITS) => "PackBits",
        _ => "Unknown",
    }
}

/// Get the name of a photometric interpretation
pub fn get_photometric_name(photometric_code: u64) -> &'static str {
    match u16::try_from(photometric_code) {
        Ok(photometric::WHITE_IS_ZERO) => "WhiteIsZero",
        Ok(photometric::BLACK_IS_ZERO) => "BlackIsZero",
        Ok(photometric::RGB) => "RGB",
        Ok(photometric::PALETTE) => "Palette",
        Ok(photometric::TRANSPARENCY_MASK) => "TransparencyMask",
        Ok(photometric::CMYK) => "CMYK",
        Ok(photometric::YCBCR) => "YCbCr",
        Ok(photometric::CIELAB) => "CIELAB",
        _ => "Unknown",
    }
}

/// Get the name of a predictor
pub fn get_predictor_name(predictor_code: u64) -> &'static str {
    match u16::try_from(predictor_code) {
        Ok(predictor::NONE) => "None",
        Ok(predictor::HORIZONTAL_DIFFERENCING) => "Horizontal differencing",
        Ok(predictor::FLOATING_POINT) => "Floating point",
        _ => "Unknown",
    }
}

pub fn get_planar_configuration_name(planar_code: u64) -> &'static str {
    match u16::try_from(planar_code) {
        Ok(planar_config::CHUNKY) => "Chunky",
        Ok(planar_config::PLANAR) => "Planar",
        _ => "Unknown",
    }
}

/// Formats a field's value, naming coded values where a table exists
pub fn describe_value(field: &TypedField) -> String {
    let name_table: Option<fn(u64) -> &'static str> = match field.tag {
        tags::COMPRESSION => Some(get_compression_name),
        tags::PHOTOMETRIC_INTERPRETATION => Some(get_photometric_name),
        tags::PREDICTOR => Some(get_predictor_name),
        tags::PLANAR_CONFIGURATION => Some(get_planar_configuration_name),
        _ => None,
    };

    match (name_table, field.as_long()) {
        (Some(lookup), Ok(code)) => format!("{} ({})", code, lookup(code)),
        _ => field.value.to_string(),
    }
}
