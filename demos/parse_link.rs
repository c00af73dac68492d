use std::io::{BufRead, Write};

use web_links::{decode::Decoder, encode::Encoder, LinkCodec};

const COLOR_SERVER: &str = "\x1b[34m";
const RESET: &str = "\x1b[0m";

const WELCOME: &str = r#"# Parsing of Link header values

Enter the value of a `Link` header, i.e., without `Link:` (or "exit").
Example: <https://example.com/page2>; rel="next", <https://example.com/page1>; rel="prev"
"#;

fn main() {
    println!("{}", WELCOME);

    let codec = LinkCodec::new();
    let stdin = std::io::stdin();

    loop {
        print!("Link: {COLOR_SERVER}");
        std::io::stdout().flush().unwrap();

        let mut line = String::new();
        let read = stdin.lock().read_line(&mut line).unwrap();
        print!("{RESET}");

        if read == 0 || line.trim() == "exit" {
            println!("Exiting.");
            break;
        }

        let value = line.trim_end_matches(|c| c == '\r' || c == '\n');

        match codec.decode(value) {
            Ok(links) => {
                println!("{:#?}", links);

                println!("# Relations");
                for (rel, link) in links.map() {
                    println!("{rel:>12} -> {}", link.uri());
                }

                println!("# Serialized");
                println!("{}", codec.encode(&links));
            }
            Err(error) => {
                println!("{error}");
            }
        }
    }
}
