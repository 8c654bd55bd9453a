/*!
forward-api-calls: relay a single XML-RPC request to the local node API.

Installed as a restricted login shell, the binary reads one request body from
stdin, wraps it in a minimal HTTP/1.0 POST, sends it to the API server's Unix
domain socket, and streams the response body (HTTP envelope stripped) back to
stdout. Authentication is the login layer's job: the server checks OS peer
credentials on the socket, so this program carries no credentials of its own.

The run is strictly sequential and single-threaded: collect stdin, connect,
send + half-close, relay. A single `alarm(2)` deadline bounds the whole run;
on expiry the default SIGALRM disposition kills the process.
*/

pub mod config;
pub mod doctor;
pub mod errors;
pub mod forward;
pub mod request;
pub mod response;
pub mod watchdog;

pub use config::ForwardConfig;
pub use errors::{display_for_forward_error, Fault, ForwardError, Op};
pub use forward::forward;
pub use response::HeaderScanner;
