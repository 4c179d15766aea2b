// `error_chain!` creates the Error, ErrorKind, ResultExt, and Result types.
// Result is a typedef of std `Result` with the error type our own `Error`,
// and the foreign links give the From conversions that let `?` work.
use error_chain::*;

error_chain! {

    errors {
        InvalidDimension(width: usize, height: usize) {
            description("invalid maze dimensions")
            display("invalid maze dimensions {}x{}: width and height must both be at least 1", width, height)
        }

        InvalidConfiguration(reason: String) {
            description("invalid configuration")
            display("invalid configuration: {}", reason)
        }
    }

    foreign_links {
        Io(::std::io::Error);
        Image(::image::ImageError);
    }
}
