use std::fmt::{self, Display};
use std::io::{self, Write};

use super::RBTree;

impl<K: Display, V> RBTree<K, V> {
    /// Writes the keys level by level, one line per depth, keys separated by a single space.
    pub fn write_levels<W: Write>(&self, mut out: W) -> io::Result<()> {
        write!(out, "{self}")?;
        out.flush()
    }

    /// Dumps the tree level by level to stdout.
    pub fn print(&self) -> io::Result<()> {
        self.write_levels(io::stdout().lock())
    }
}

impl<K: Display, V> Display for RBTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for level in self.levels() {
            let mut keys = level.into_iter();
            if let Some(first) = keys.next() {
                write!(f, "{first}")?;
            }
            for key in keys {
                write!(f, " {key}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
