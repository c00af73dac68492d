use std::fmt::Debug;

use crate::{
    decode::{Decoder, LinkResult},
    encode::Encoder,
    types::Links,
    LinkCodec,
};

pub(crate) fn known_answer_test_parse<'a, O, P>(
    (test, expected_remainder, expected_object): (&'a str, &str, O),
    parser: P,
) where
    O: Debug + Eq + 'a,
    P: Fn(&'a str) -> LinkResult<&'a str, O>,
{
    let (got_remainder, got_object) = parser(test).unwrap();
    assert_eq!(expected_remainder, got_remainder);
    assert_eq!(expected_object, got_object);
}

/// Decodes each input, compares it with the expected links, and checks that encoding and decoding
/// again yields the same links.
pub(crate) fn kat_inverse_links(tests: &[(&str, Links)]) {
    let codec = LinkCodec::new();

    for (no, (test_input, expected_object)) in tests.iter().enumerate() {
        println!("# {no}");

        let got_object = codec.decode(test_input).unwrap();
        assert_eq!(*expected_object, got_object);

        let got_output = codec.encode(&got_object);
        println!("{test_input:?} -> {got_output:?}");

        let got_object_again = codec.decode(&got_output).unwrap();
        assert_eq!(got_object, got_object_again);
    }
}
