// src/main.rs
//
// Minimal command-line front end for the chain library:
//
// - obtains the process-wide chain (seeding genesis on first access),
// - appends every command-line argument as a block payload,
// - prints the full chain, genesis first, and re-verifies it.
//
// Usage: hashchain [DATA...]

use hashchain::{Block, get_chain};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "hashchain=warn".to_string()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(std::env::args().skip(1)) {
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

fn run(payloads: impl Iterator<Item = String>) -> Result<(), String> {
    let chain = get_chain();

    for data in payloads {
        chain.append(data);
    }

    for (height, block) in chain.all_blocks().iter().enumerate() {
        print_block(height, block);
    }

    chain
        .verify()
        .map_err(|e| format!("chain failed verification: {e}"))?;
    println!("chain verified: {} block(s)", chain.len());
    Ok(())
}

fn print_block(height: usize, block: &Block) {
    println!("height:    {height}");
    println!("data:      {}", block.data());
    println!("hash:      {}", block.hash());
    println!("prev_hash: {}", block.prev_hash_hex());
    println!();
}
