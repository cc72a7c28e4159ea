//! Hash a stream of chunks and compare against the one-shot digest

use std::io::Write;

use sha256_stream::{AfterFinish, EngineConfig, Sha256};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Streaming SHA-256 Example");
    println!("=========================\n");

    let message = b"The quick brown fox jumps over the lazy dog";

    // Feed the message in uneven pieces
    let mut engine = Sha256::new();
    for piece in message.chunks(7) {
        engine.update(piece)?;
        println!(
            "Fed {:2} bytes: total={:2} pending={:2}",
            piece.len(),
            engine.byte_len(),
            engine.pending()
        );
    }

    let streamed = engine.finish();
    let one_shot = Sha256::digest(message);
    println!("\nStreamed: {streamed}");
    println!("One-shot: {one_shot}");
    assert_eq!(streamed, one_shot);

    // More data after finish is rejected unless the engine is told to extend
    if let Err(err) = engine.update(b"!") {
        println!("\nUpdate after finish: {err}");
    }

    let config = EngineConfig::default().with_after_finish(AfterFinish::Extend);
    let mut extending = Sha256::with_config(config);
    extending.write_all(message)?;
    extending.finish();
    extending.write_all(b"!")?;
    println!("Extended: {}", extending.finish());

    // Text input is validated before hashing
    let mut text = Sha256::new();
    text.update_str("h\u{e9}llo w\u{f6}rld \u{2713}")?;
    println!("UTF-8:    {}", text.finish());

    println!("\nDigests match.");

    Ok(())
}
