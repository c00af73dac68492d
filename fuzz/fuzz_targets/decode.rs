#![no_main]

use libfuzzer_sys::fuzz_target;
use web_links_fuzz::impl_decode_target;

fuzz_target!(|input: &str| {
    impl_decode_target!(input);
});
