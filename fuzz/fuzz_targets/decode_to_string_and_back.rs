#![no_main]

use libfuzzer_sys::fuzz_target;
use web_links_fuzz::impl_to_string_and_back;

fuzz_target!(|input: &str| {
    impl_to_string_and_back!(input);
});
