//! DER type-length-value reading for the key structures in this crate.
//!
//! This is not a general ASN.1 decoder. It walks a flat byte buffer by
//! TLV boundaries and understands exactly the shapes that appear in
//! PKCS#1 `RSAPrivateKey` and PKCS#8 `PrivateKeyInfo`.

use num_bigint::BigUint;

use crate::errors::{Error, Result};

pub(crate) const TAG_INTEGER: u8 = 0x02;
pub(crate) const TAG_OCTET_STRING: u8 = 0x04;
pub(crate) const TAG_NULL: u8 = 0x05;
pub(crate) const TAG_OBJECT_IDENTIFIER: u8 = 0x06;
pub(crate) const TAG_SEQUENCE: u8 = 0x30;

/// Forward-only cursor over a DER-encoded buffer.
pub(crate) struct Reader<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(input: &'a [u8]) -> Self {
        Reader { input, pos: 0 }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.pos == self.input.len()
    }

    fn read_byte(&mut self) -> Result<u8> {
        let b = self
            .input
            .get(self.pos)
            .copied()
            .ok_or_else(|| Error::malformed("truncated DER"))?;
        self.pos += 1;
        Ok(b)
    }

    fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.input.len())
            .ok_or_else(|| Error::malformed("truncated DER"))?;
        let out = &self.input[self.pos..end];
        self.pos = end;
        Ok(out)
    }

    /// Reads a length field. Short form is a single byte below 0x80;
    /// long form is `0x80 | n` followed by `n` big-endian bytes, with
    /// `1 <= n <= 4`.
    fn read_length(&mut self) -> Result<usize> {
        let first = self.read_byte()?;
        if first < 0x80 {
            return Ok(first as usize);
        }

        let count = (first & 0x7f) as usize;
        if count == 0 || count > 4 {
            return Err(Error::malformed("unsupported DER length form"));
        }

        let mut len = 0usize;
        for &b in self.read_bytes(count)? {
            len = (len << 8) | b as usize;
        }
        Ok(len)
    }

    /// Reads one TLV with the expected tag and returns its content.
    fn read_value(&mut self, tag: u8) -> Result<&'a [u8]> {
        let got = self.read_byte()?;
        if got != tag {
            return Err(Error::malformed(format!(
                "expected tag 0x{:02x}, found 0x{:02x}",
                tag, got
            )));
        }
        let len = self.read_length()?;
        self.read_bytes(len)
    }

    /// Descends into a SEQUENCE, returning a reader over its content.
    pub(crate) fn read_sequence(&mut self) -> Result<Reader<'a>> {
        Ok(Reader::new(self.read_value(TAG_SEQUENCE)?))
    }

    /// Reads an INTEGER as an unsigned big integer.
    ///
    /// A leading 0x00 octet that is present only to keep the sign bit
    /// clear is stripped before the value is constructed.
    pub(crate) fn read_uint(&mut self) -> Result<BigUint> {
        let mut content = self.read_value(TAG_INTEGER)?;
        if content.is_empty() {
            return Err(Error::malformed("empty INTEGER"));
        }
        if content[0] == 0x00 && content.len() > 1 && content[1] & 0x80 != 0 {
            content = &content[1..];
        }
        Ok(BigUint::from_bytes_be(content))
    }

    pub(crate) fn read_octet_string(&mut self) -> Result<&'a [u8]> {
        self.read_value(TAG_OCTET_STRING)
    }

    pub(crate) fn read_null(&mut self) -> Result<()> {
        let content = self.read_value(TAG_NULL)?;
        if !content.is_empty() {
            return Err(Error::malformed("NULL with content"));
        }
        Ok(())
    }

    /// Reads an OBJECT IDENTIFIER and renders it in dotted form.
    ///
    /// The first octet packs the leading two sub-identifiers; the rest
    /// are base-128 with the high bit as a continuation marker.
    pub(crate) fn read_oid(&mut self) -> Result<String> {
        let content = self.read_value(TAG_OBJECT_IDENTIFIER)?;
        if content.is_empty() {
            return Err(Error::malformed("empty OBJECT IDENTIFIER"));
        }

        let first = content[0];
        let x = core::cmp::min(first / 40, 2);
        let y = first - 40 * x;

        let mut oid = format!("{}.{}", x, y);
        let mut arc: u64 = 0;
        for &b in &content[1..] {
            if arc > u64::MAX >> 7 {
                return Err(Error::malformed("OBJECT IDENTIFIER arc too large"));
            }
            arc = (arc << 7) | (b & 0x7f) as u64;
            if b & 0x80 == 0 {
                oid.push_str(&format!(".{}", arc));
                arc = 0;
            }
        }
        if content[content.len() - 1] & 0x80 != 0 {
            return Err(Error::malformed("unterminated OBJECT IDENTIFIER arc"));
        }

        Ok(oid)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::short(vec![0x05], 5)]
    #[case::short_max(vec![0x7f], 127)]
    #[case::long_one(vec![0x81, 0x80], 128)]
    #[case::long_two(vec![0x82, 0x02, 0x10], 256 * 0x02 + 0x10)]
    #[case::long_three(vec![0x83, 0x01, 0x00, 0x00], 256 * 256)]
    #[case::long_two_max(vec![0x82, 0xff, 0xff], 256 * 0xff + 0xff)]
    fn parse_length(#[case] input: Vec<u8>, #[case] expected: usize) {
        let mut reader = Reader::new(&input);
        assert_eq!(reader.read_length().unwrap(), expected);
    }

    #[rstest]
    #[case::indefinite(vec![0x80])]
    #[case::five_length_bytes(vec![0x85, 0x01, 0x01, 0x01, 0x01, 0x01])]
    #[case::truncated_length(vec![0x82, 0x01])]
    fn parse_length_rejects(#[case] input: Vec<u8>) {
        let mut reader = Reader::new(&input);
        assert!(matches!(
            reader.read_length(),
            Err(Error::MalformedKey { .. })
        ));
    }

    #[rstest]
    #[case::one(vec![0x02, 0x01, 0x01], 1u64)]
    #[case::zero(vec![0x02, 0x01, 0x00], 0)]
    #[case::two_bytes(vec![0x02, 0x02, 0x01, 0x02], 258)]
    #[case::sign_pad_stripped(vec![0x02, 0x02, 0x00, 0x80], 128)]
    #[case::low_second_byte_kept(vec![0x02, 0x02, 0x00, 0x7f], 127)]
    fn parse_uint(#[case] input: Vec<u8>, #[case] expected: u64) {
        let mut reader = Reader::new(&input);
        assert_eq!(reader.read_uint().unwrap(), BigUint::from(expected));
    }

    #[test]
    fn sign_pad_strip_preserves_magnitude() {
        // 0x00 0x80 ... encodes the positive value 0x80...; the pad
        // byte must not survive into the byte representation.
        let input = [0x02, 0x09, 0x00, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01];
        let mut reader = Reader::new(&input);
        let value = reader.read_uint().unwrap();
        assert_eq!(value.to_bytes_be().len(), 8);
        assert_eq!(value, BigUint::from(0x8000_0000_0000_0001u64));
    }

    #[rstest]
    #[case::empty(vec![0x02, 0x00])]
    #[case::wrong_tag(vec![0x04, 0x01, 0x01])]
    #[case::truncated_content(vec![0x02, 0x05, 0x01])]
    fn parse_uint_rejects(#[case] input: Vec<u8>) {
        let mut reader = Reader::new(&input);
        assert!(matches!(reader.read_uint(), Err(Error::MalformedKey { .. })));
    }

    #[test]
    fn sequence_of_integers() {
        let input = [
            0x30, 0x09, 0x02, 0x01, 0x07, 0x02, 0x01, 0x08, 0x02, 0x01, 0x09,
        ];
        let mut reader = Reader::new(&input);
        let mut seq = reader.read_sequence().unwrap();
        assert!(reader.is_empty());

        for expected in [7u64, 8, 9] {
            assert_eq!(seq.read_uint().unwrap(), BigUint::from(expected));
        }
        assert!(seq.is_empty());
    }

    #[test]
    fn sequence_with_long_form_length() {
        // 0x82 length form wrapping 300 one-byte INTEGERs.
        let mut input = vec![0x30, 0x82, 0x03, 0x84];
        for _ in 0..300 {
            input.extend_from_slice(&[0x02, 0x01, 0x2a]);
        }

        let mut reader = Reader::new(&input);
        let mut seq = reader.read_sequence().unwrap();
        let mut count = 0;
        while !seq.is_empty() {
            assert_eq!(seq.read_uint().unwrap(), BigUint::from(42u64));
            count += 1;
        }
        assert_eq!(count, 300);
    }

    #[test]
    fn truncated_sequence() {
        let input = [0x30, 0x05, 0x02, 0x01, 0x07];
        let mut reader = Reader::new(&input);
        assert!(matches!(
            reader.read_sequence(),
            Err(Error::MalformedKey { .. })
        ));
    }

    #[rstest]
    #[case::rsa_encryption(
        vec![0x06, 0x09, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x01],
        "1.2.840.113549.1.1.1"
    )]
    #[case::sha256(
        vec![0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x01],
        "2.16.840.1.101.3.4.2.1"
    )]
    fn parse_oid(#[case] input: Vec<u8>, #[case] expected: &str) {
        let mut reader = Reader::new(&input);
        assert_eq!(reader.read_oid().unwrap(), expected);
    }

    #[test]
    fn unterminated_oid_arc() {
        let input = [0x06, 0x02, 0x2a, 0x86];
        let mut reader = Reader::new(&input);
        assert!(matches!(reader.read_oid(), Err(Error::MalformedKey { .. })));
    }

    #[test]
    fn null_must_be_empty() {
        let mut ok = Reader::new(&[0x05, 0x00]);
        assert!(ok.read_null().is_ok());

        let mut bad = Reader::new(&[0x05, 0x01, 0x00]);
        assert!(matches!(bad.read_null(), Err(Error::MalformedKey { .. })));
    }
}
