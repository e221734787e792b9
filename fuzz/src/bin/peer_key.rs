#[macro_use]
extern crate afl;
use parley::Session;

fn main() {
    fuzz!(|data: &[u8]| {
        if let Ok(input) = std::str::from_utf8(data) {
            let mut session = Session::new().expect("Setup failed");
            let _ = session.set_peer_public_key(input);
        }
    });
}
