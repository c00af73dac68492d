#[macro_export]
macro_rules! impl_decode_target {
    ($input:expr) => {{
        use web_links::{decode::Decoder, LinkCodec};

        #[cfg(feature = "debug")]
        println!("[!] Input: {:?}", $input);

        match LinkCodec::new().decode($input) {
            Ok(_parsed) => {
                #[cfg(feature = "debug")]
                println!("[!] Parsed: {_parsed:?}");
            }
            Err(_error) => {
                #[cfg(feature = "debug")]
                println!("[!] <invalid> {_error}");
            }
        }
    }};
}

#[macro_export]
macro_rules! impl_to_string_and_back {
    ($input:expr) => {{
        use web_links::{decode::Decoder, encode::Encoder, LinkCodec};

        let codec = LinkCodec::new();

        #[cfg(feature = "debug")]
        println!("[!] Input: {:?}", $input);

        if let Ok(parsed1) = codec.decode($input) {
            #[cfg(feature = "debug")]
            println!("[!] Parsed1: {parsed1:?}");

            let output = codec.encode(&parsed1);
            #[cfg(feature = "debug")]
            println!("[!] Serialized: {output:?}");

            // Parameter names, charsets, and languages are written verbatim. One containing `=`,
            // `;`, `,` or `'` splits differently after encoding, so the second pass must not panic
            // but may differ.
            let _parsed2 = codec.decode(&output);
            #[cfg(feature = "debug")]
            println!("[!] Parsed2: {_parsed2:?}");
        } else {
            #[cfg(feature = "debug")]
            println!("[!] <invalid>");
        }
    }};
}
