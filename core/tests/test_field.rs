#[cfg(test)]
mod tests {
    use sealbench_core::{
        constants::{FIELD_HEADER_LEN, NONCE_LEN, TAG_LEN},
        crypto::{EncodedField, RevealError},
    };

    #[test]
    fn compose_places_parts_at_fixed_offsets() {
        let nonce = [0xAAu8; NONCE_LEN];
        let tag = [0xBBu8; TAG_LEN];
        let blob = EncodedField::compose(&nonce, &tag, b"cipher");

        assert_eq!(&blob[..16], &nonce);
        assert_eq!(&blob[16..32], &tag);
        assert_eq!(&blob[32..], b"cipher");
    }

    #[test]
    fn parse_splits_at_fixed_offsets() {
        let blob: Vec<u8> = (0u8..40).collect();
        let field = EncodedField::parse(&blob).expect("parse");

        assert_eq!(field.nonce[0], 0);
        assert_eq!(field.nonce[15], 15);
        assert_eq!(field.tag[0], 16);
        assert_eq!(field.tag[15], 31);
        assert_eq!(field.ciphertext, &blob[32..]);
        assert_eq!(field.encoded_len(), 40);
    }

    #[test]
    fn header_only_blob_has_empty_ciphertext() {
        let blob = vec![1u8; FIELD_HEADER_LEN];
        let field = EncodedField::parse(&blob).expect("parse");
        assert!(field.ciphertext.is_empty());
    }

    #[test]
    fn short_blob_is_malformed_not_authentication() {
        for len in [0usize, 1, 16, 31] {
            let blob = vec![0u8; len];
            let err = EncodedField::parse(&blob).unwrap_err();
            assert_eq!(err, RevealError::MalformedEncoding { len, min: FIELD_HEADER_LEN });
            assert_ne!(err, RevealError::Authentication);
        }
    }
}
