/// Shortens a display address to its first five and last four characters,
/// e.g. `0x66f9...6657`. Inputs shorter than nine characters are returned
/// unchanged. Slicing is character based so multibyte input cannot panic.
pub fn shorten(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() < 9 {
        return address.to_string();
    }
    let head: String = chars[..5].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_shorten_address() {
        assert_eq!(
            shorten("0x66f9664f97F2b50F62D13eA064982f936dE76657"),
            "0x66f...6657"
        );
    }

    #[test]
    fn test_shorten_keeps_head_and_tail() {
        let address = "0xabcdef0123456789";
        let short = shorten(address);
        assert!(short.starts_with(&address[..5]));
        assert!(short.ends_with(&address[address.len() - 4..]));
        assert_eq!(short.len(), 5 + 3 + 4);
    }

    #[test]
    fn test_shorten_minimum_length() {
        assert_eq!(shorten("123456789"), "12345...6789");
    }

    #[test]
    fn test_short_input_passes_through() {
        assert_eq!(shorten("0xab12"), "0xab12");
        assert_eq!(shorten(""), "");
    }
}
