//! String utility functions

/// Trims trailing NUL bytes from a buffer
pub fn trim_trailing_nulls(buffer: &mut Vec<u8>) {
    while buffer.last() == Some(&0) {
        buffer.pop();
    }
}

/// Formats a byte count with a binary unit
pub fn format_byte_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}
