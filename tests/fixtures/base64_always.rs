// Code generated by emx-zipgen. DO NOT EDIT.

#[allow(dead_code)]
pub mod assets {
    use base64::Engine;
    use std::fs;
    use std::io;
    use std::path::Path;

    #[allow(non_upper_case_globals)]
    pub const zipdata: &str = "
UEsDBBQAAAAIAAAAIQCsKpPYBAAAAAIAAAAFAAAAYS50eHTLyAQAUEsDBBQA
AAAAAAAAIQAAAAAAAAAAAAAAAAAEAAAAc3ViL1BLAwQUAAAACAAAACEAJkwL
txgBAAAABAAACQAAAHN1Yi9iLmJpbmNgZGJmYWVj5+Dk4ubh5eMXEBQSFhEV
E5eQlJKWkZWTV1BUUlZRVVPX0NTS1tHV0zcwNDI2MTUzt7C0sraxtbN3cHRy
dnF1c/fw9PL28fXzDwgMCg4JDQuPiIyKjomNi09ITEpOSU1Lz8jMys7Jzcsv
KCwqLiktK6+orKquqa2rb2hsam5pbWvv6Ozq7unt658wcdLkKVOnTZ8xc9bs
OXPnzV+wcNHiJUuXLV+xctXqNWvXrd+wcdPmLVu3bd+xc9fuPXv37T9w8NDh
I0ePHT9x8tTpM2fPnb9w8dLlK1evXb9x89btO3fv3X/w8NHjJ0+fPX/x8tXr
N2/fvf/w8dPnL1+/ff/x89fvP3///WcY9f+o/0ew/wFQSwECFAMUAAAACAAA
ACEArCqT2AQAAAACAAAABQAAAAAAAAAAAAAApIEAAAAAYS50eHRQSwECFAMU
AAAAAAAAACEAAAAAAAAAAAAAAAAABAAAAAAAAAAAABAA7UEnAAAAc3ViL1BL
AQIUAxQAAAAIAAAAIQAmTAu3GAEAAAAEAAAJAAAAAAAAAAAAAACkgUkAAABz
dWIvYi5iaW5QSwUGAAAAAAMAAwCcAAAAiAEAAAAA
";

    /// Extracts the embedded zip data into `path`, replacing existing files.
    pub fn unzip(path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let text: String = zipdata.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        let data = base64::engine::general_purpose::STANDARD.decode(text)?;
        let mut archive = zip::ZipArchive::new(io::Cursor::new(data))?;

        for index in 0..archive.len() {
            let mut entry = archive.by_index(index)?;
            let name = entry.enclosed_name().ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("invalid entry name: {}", entry.name()),
                )
            })?;
            let target = path.as_ref().join(name);

            if entry.is_dir() {
                create_dir_all(&target)?;
                continue;
            }
            if let Some(parent) = target.parent() {
                create_dir_all(parent)?;
            }

            let mut file = fs::File::create(&target)?;
            io::copy(&mut entry, &mut file)?;
        }

        Ok(())
    }

    fn create_dir_all(path: &Path) -> io::Result<()> {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o755);
        }
        builder.create(path)
    }
}
