//! Interactive front-end for the parley core.
//!
//! Drives a single [`Session`] from stdin: import the peer's key, encrypt,
//! decrypt, inspect status. Messages travel over whatever channel the user
//! copies them into.

use clap::Parser;
use parley::Session;
use std::io::{self, BufRead, Write};

/// End-to-end encrypted messaging over any copy/paste channel.
#[derive(Parser)]
#[command(name = "parley", version, about)]
struct Cli {}

fn main() {
    let _cli = Cli::parse();

    let mut session = match Session::new() {
        Ok(session) => session,
        Err(err) => {
            eprintln!("Failed to initialize session: {err}");
            std::process::exit(1);
        }
    };

    println!("=== parley - end-to-end encrypted messaging ===");
    println!();
    println!("Your public key (share this with your peer):");
    println!("{}", session.public_key_base64());
    println!();
    println!("Type 'help' for available commands.");
    println!();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(_)) | None => break,
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let (cmd, arg) = match input.split_once(' ') {
            Some((cmd, arg)) => (cmd, arg.trim()),
            None => (input, ""),
        };

        match cmd.to_lowercase().as_str() {
            "key" => cmd_key(&mut session, arg),
            "e" => cmd_encrypt(&mut session, arg),
            "d" => cmd_decrypt(&mut session, arg),
            "status" => cmd_status(&session),
            "help" => cmd_help(),
            "quit" | "exit" | "q" => {
                if confirm_exit(&mut lines) {
                    println!("Goodbye!");
                    return;
                }
            }
            _ => println!("Unknown command: {cmd}. Type 'help' for available commands."),
        }
    }
}

fn confirm_exit(lines: &mut io::Lines<io::StdinLock<'_>>) -> bool {
    print!("Are you sure you want to exit? (y/N): ");
    let _ = io::stdout().flush();

    match lines.next() {
        Some(Ok(response)) => {
            let response = response.trim().to_lowercase();
            response == "y" || response == "yes"
        }
        // EOF counts as confirmation
        Some(Err(_)) | None => true,
    }
}

fn cmd_key(session: &mut Session, base64_key: &str) {
    if base64_key.is_empty() {
        println!("Usage: key <base64-public-key>");
        return;
    }

    if let Err(err) = session.set_peer_public_key(base64_key) {
        println!("Error: {err}");
        return;
    }

    println!("Peer public key imported successfully!");
    println!("Secure channel established. You can now encrypt and decrypt messages.");
    println!();

    if let Some(words) = session.verification_words() {
        println!("=== Security Verification ===");
        println!("Verify these words match on both sides to ensure no MITM attack:");
        println!("  {}", words.join(" - "));
        println!();
    }
}

fn cmd_encrypt(session: &mut Session, plaintext: &str) {
    if plaintext.is_empty() {
        println!("Usage: e <plaintext message>");
        return;
    }

    match session.encrypt(plaintext) {
        Ok(ciphertext) => {
            println!("Encrypted message (send this to your peer):");
            println!("{ciphertext}");
        }
        Err(err) => println!("Error: {err}"),
    }
}

fn cmd_decrypt(session: &mut Session, ciphertext: &str) {
    if ciphertext.is_empty() {
        println!("Usage: d <base64-ciphertext>");
        return;
    }

    match session.decrypt(ciphertext) {
        Ok(plaintext) => {
            println!("Decrypted message:");
            println!("{plaintext}");
        }
        Err(err) => println!("Error: {err}"),
    }
}

fn cmd_status(session: &Session) {
    println!("=== Session Status ===");
    println!("Session established: {}", session.is_established());
    println!();
    println!("Your public key:");
    println!("{}", session.public_key_base64());

    if let Some(peer_key) = session.peer_public_key_base64() {
        println!();
        println!("Peer's public key:");
        println!("{peer_key}");

        if let Some(words) = session.verification_words() {
            println!();
            println!("Verification words:");
            println!("  {}", words.join(" - "));
        }

        let (sent, received) = session.message_stats();
        println!();
        println!("Messages sent: {sent}, received: {received}");
        println!("(Each message uses a unique key for forward secrecy)");
    }
}

fn cmd_help() {
    println!("=== Available Commands ===");
    println!();
    println!("  key <base64-public-key>  Import peer's public key to establish secure channel");
    println!("  e <plaintext>            Encrypt a message");
    println!("  d <base64-ciphertext>    Decrypt a message");
    println!("  status                   Show current session status");
    println!("  help                     Show this help message");
    println!("  quit / exit / q          Exit the program");
    println!();
    println!("=== Usage Flow ===");
    println!();
    println!("1. Share your public key with your peer (displayed at startup)");
    println!("2. Import your peer's public key using: key <their-public-key>");
    println!("3. Verify the 5 words match on both sides (MITM protection)");
    println!("4. Encrypt messages using: e <your message>");
    println!("5. Decrypt received messages using: d <encrypted-message>");
}
