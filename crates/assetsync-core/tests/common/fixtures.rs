//! Listing markup and zip archives built in memory.

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;

/// Nexus-style content listing with one `content-item` per version.
pub fn listing_xml(base: &str, versions: &[&str]) -> String {
    let mut items = String::new();
    for v in versions {
        items.push_str(&format!(
            "    <content-item>\n\
             \x20     <resourceURI>{base}{v}/</resourceURI>\n\
             \x20     <relativePath>/uk/gov/hmrc/assets-frontend/{v}/</relativePath>\n\
             \x20     <text>{v}</text>\n\
             \x20     <leaf>false</leaf>\n\
             \x20     <lastModified>2016-02-11 09:41:07.0 UTC</lastModified>\n\
             \x20     <sizeOnDisk>-1</sizeOnDisk>\n\
             \x20   </content-item>\n"
        ));
    }
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<content>\n  <data>\n{items}  </data>\n</content>\n"
    )
}

/// Zip archive bytes. Names ending in `/` become directory entries.
pub fn zip_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, data) in entries {
        if name.ends_with('/') {
            zip.add_directory(*name, options).unwrap();
        } else {
            zip.start_file(*name, options).unwrap();
            zip.write_all(data.as_bytes()).unwrap();
        }
    }
    zip.finish().unwrap().into_inner()
}
