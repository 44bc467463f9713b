//! Serializes a compressed image for embedding in firmware.

use crate::encode::CompressedImage;
use std::io::{self, Write};

const BYTES_PER_LINE: usize = 16;

/// Writes `img` as a C constant of type `struct dp_cimage` named `name`.
pub fn write_c<W: Write>(img: &CompressedImage, name: &str, mut w: W) -> io::Result<()> {
    write!(
        w,
        "#include \"display.h\"\n\
         \n\
         const struct dp_cimage {name} = {{\n\
         \t.width = {},\n\
         \t.height = {},\n\
         \t.data = {{",
        img.width(),
        img.height()
    )?;
    for line in img.payload().chunks(BYTES_PER_LINE) {
        w.write_all(b"\n\t\t")?;
        for byte in line {
            write!(w, "0x{byte:02x},")?;
        }
    }
    w.write_all(b"\n\t},\n};\n")?;
    w.flush()
}

/// Writes the payload as a single line of lowercase hex.
pub fn write_hex<W: Write>(img: &CompressedImage, mut w: W) -> io::Result<()> {
    writeln!(w, "{}", hex::encode(img.payload()))?;
    w.flush()
}
