use std::fmt::Write;

pub(crate) fn write_tabs(mut target: impl Write, count: usize) -> std::fmt::Result {
    for _ in 0..count {
        target.write_char('\t')?;
    }
    Ok(())
}

/// Writes `0x` and at least two lowercase hex digits. Wider values keep all their digits.
pub(crate) fn write_element(mut target: impl Write, value: u64) -> std::fmt::Result {
    write!(target, "0x{:02x}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(value: u64) -> String {
        let mut s = String::new();
        write_element(&mut s, value).unwrap();
        s
    }

    #[test]
    fn pads_to_two_digits() {
        assert_eq!(element(0), "0x00");
        assert_eq!(element(0x0a), "0x0a");
        assert_eq!(element(0xff), "0xff");
    }

    #[test]
    fn wide_values_are_not_truncated() {
        assert_eq!(element(0x100), "0x100");
        assert_eq!(element(0xdead_beef), "0xdeadbeef");
    }

    #[test]
    fn tabs() {
        let mut s = String::new();
        write_tabs(&mut s, 3).unwrap();
        assert_eq!(s, "\t\t\t");
    }
}
