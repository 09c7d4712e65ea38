/// Hex dump of the payload's UTF-16 code units: each unit as a zero-padded
/// four-digit group followed by a single space, trailing space included.
/// The four-digit width and the code-unit (not byte) granularity are a
/// compatibility contract with existing consumers of this output.
pub(super) fn render(data: &str) -> String {
    let mut out = String::with_capacity(data.len() * 5);
    for unit in data.encode_utf16() {
        out.push_str(&hex::encode(unit.to_be_bytes()));
        out.push(' ');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_each_code_unit_zero_padded() {
        assert_eq!(render("AB"), "0041 0042 ");
        assert_eq!(render("z"), "007a ");
        assert_eq!(render("한"), "d55c ");
    }
}
