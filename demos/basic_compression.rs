use huffzip::{HuffmanCodec, TextReport};
use std::fs::File;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Create a sample file
    let sample_text = "Hello, world! This is a sample text for Huffman compression. \
                      The quick brown fox jumps over the lazy dog. \
                      Huffman encoding is a greedy algorithm that builds optimal prefix codes.";

    std::fs::write("sample.txt", sample_text)?;

    println!("Created sample file: {} bytes", sample_text.len());

    // Compress the file, printing the tables on the way
    let input = File::open("sample.txt")?;
    let output = File::create("sample_encoded.huf")?;
    let mut report = TextReport::new(std::io::stdout());
    let stats = HuffmanCodec::encode_from_file_with_report(input, output, &mut report)?;

    println!(
        "Compressed to: {} bytes ({:.1}% of original), {} header bits, {} padding bits",
        stats.compressed_length(),
        100.0 - stats.savings_percent(),
        stats.header_bits,
        stats.padding_bits()
    );

    // Decompress the file
    let compressed = File::open("sample_encoded.huf")?;
    let decompressed = File::create("sample_decoded.txt")?;
    HuffmanCodec::decode_from_file(compressed, decompressed)?;

    // Verify the result
    let decompressed_text = std::fs::read_to_string("sample_decoded.txt")?;

    if sample_text == decompressed_text {
        println!("Decompression successful! Data matches exactly.");
    } else {
        println!("Decompression failed! Data mismatch.");
        return Err("Decompression verification failed".into());
    }

    // Cleanup
    std::fs::remove_file("sample.txt")?;
    std::fs::remove_file("sample_encoded.huf")?;
    std::fs::remove_file("sample_decoded.txt")?;

    println!("Cleaned up temporary files");

    Ok(())
}
