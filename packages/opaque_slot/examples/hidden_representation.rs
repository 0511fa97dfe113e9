//! Shows how a library type keeps its representation private while storing
//! it inline.
//!
//! `Session` exposes connection-ish behavior; its representation is a private
//! struct whose fields can be reordered, renamed, or retyped freely, as long
//! as the result still fits the declared reservation. If a change outgrows
//! the reservation, the build fails at the first operation that touches the
//! slot, pointing straight at the mismatch.

use session::Session;

fn main() {
    let mut session = Session::connect("core-7");

    session.send(3);
    session.send(5);

    println!("peer: {}", session.peer());
    println!("messages sent: {}", session.sent());

    let standby = Session::connect("core-9");
    println!("standby peer: {}", standby.peer());
}

mod session {
    use opaque_slot::OpaqueSlot;
    use opaque_slot::align::Align8;

    use self::body::SessionBody;

    /// The declared reservation. `SessionBody` holds a `String` and two
    /// counters today; the const expression keeps the declaration honest
    /// across platforms and refactorings alike.
    const BODY_SIZE: usize = size_of::<String>() + 2 * size_of::<u64>();

    /// A connection handle with a private, inline representation.
    pub struct Session {
        body: OpaqueSlot<SessionBody, BODY_SIZE, Align8>,
    }

    impl Session {
        /// Opens a session to the named peer.
        pub fn connect(peer: &str) -> Self {
            Self {
                body: OpaqueSlot::new(SessionBody::new(peer)),
            }
        }

        /// Sends one message of `weight` units.
        pub fn send(&mut self, weight: u64) {
            self.body.record(weight);
        }

        /// Returns the peer this session is connected to.
        pub fn peer(&self) -> &str {
            self.body.peer()
        }

        /// Returns the number of messages sent so far.
        pub fn sent(&self) -> u64 {
            self.body.sent()
        }
    }

    mod body {
        pub(super) struct SessionBody {
            peer: String,
            sent: u64,
            total_weight: u64,
        }

        impl SessionBody {
            pub(super) fn new(peer: &str) -> Self {
                Self {
                    peer: peer.to_string(),
                    sent: 0,
                    total_weight: 0,
                }
            }

            pub(super) fn record(&mut self, weight: u64) {
                self.sent = self.sent.wrapping_add(1);
                self.total_weight = self.total_weight.wrapping_add(weight);
            }

            pub(super) fn peer(&self) -> &str {
                &self.peer
            }

            pub(super) fn sent(&self) -> u64 {
                self.sent
            }
        }
    }
}
