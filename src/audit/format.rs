const KIB: u64 = 1024;
const MIB: u64 = KIB * 1024;
const GIB: u64 = MIB * 1024;
const TIB: u64 = GIB * 1024;

/// Formats a raw byte count for display, using the largest unit that keeps
/// the scaled value under 1024 (T is the ceiling). Below 1K the count is
/// printed as a plain integer; otherwise with exactly two decimals. The unit
/// letter is appended with no space.
pub fn format_bytes(value: u64) -> String {
    if value < KIB {
        format!("{value}B")
    } else if value < MIB {
        format!("{:.2}K", value as f64 / KIB as f64)
    } else if value < GIB {
        format!("{:.2}M", value as f64 / MIB as f64)
    } else if value < TIB {
        format!("{:.2}G", value as f64 / GIB as f64)
    } else {
        format!("{:.2}T", value as f64 / TIB as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_below_1k_are_raw_integers() {
        assert_eq!(format_bytes(0), "0B");
        assert_eq!(format_bytes(512), "512B");
        assert_eq!(format_bytes(1023), "1023B");
    }

    #[test]
    fn threshold_values_belong_to_the_next_unit() {
        assert_eq!(format_bytes(1024), "1.00K");
        assert_eq!(format_bytes(1048576), "1.00M");
        assert_eq!(format_bytes(1073741824), "1.00G");
        assert_eq!(format_bytes(1099511627776), "1.00T");
    }

    #[test]
    fn scaled_values_carry_two_decimals() {
        assert_eq!(format_bytes(1536), "1.50K");
        assert_eq!(format_bytes(104857600), "100.00M");
        assert_eq!(format_bytes(2147483648), "2.00G");
    }

    #[test]
    fn terabytes_are_the_ceiling() {
        assert_eq!(format_bytes(2199023255552), "2.00T");
    }
}
