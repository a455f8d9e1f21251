//! version command - Display the application version

use anyhow::Result;

use crate::engine::Streams;

/// Application display name.
const APP_NAME: &str = "OCX Reader CLI";

/// Display the application version.
pub fn version(streams: &mut Streams) -> Result<()> {
    streams.outln(format!("{} v{}", APP_NAME, env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prints_name_and_version() {
        let mut streams = Streams::new();
        version(&mut streams).unwrap();

        assert!(streams.out.starts_with("OCX Reader CLI v"));
        assert!(streams.out.contains(env!("CARGO_PKG_VERSION")));
        assert!(streams.err.is_empty());
    }
}
