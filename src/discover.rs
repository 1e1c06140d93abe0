/// Discovery of candidate link map files under Xcode's DerivedData.
///
/// Xcode writes link maps (when `Write Link Map File` is enabled) to
/// `DerivedData/<Name>-<hash>/Build/Intermediates*/<Name>.build/
/// <config>/<Name>.build/<Name>-LinkMap-*.txt`. This is convenience for
/// the presentation layer, not part of the parsing contract.
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;

use log::warn;

/// Plausible link map paths, newest-modified first. Any filesystem or
/// pattern trouble degrades to an empty list (logged), never an error.
pub fn available_linkmap_files() -> Vec<String> {
    match scan_derived_data() {
        Ok(paths) => paths,
        Err(e) => {
            warn!("link map discovery failed: {e}");
            Vec::new()
        }
    }
}

fn scan_derived_data() -> Result<Vec<String>, Box<dyn Error>> {
    let home = std::env::var_os("HOME").ok_or("HOME not set")?;
    let root = PathBuf::from(home).join("Library/Developer/Xcode/DerivedData");

    let mut found: Vec<(SystemTime, String)> = Vec::new();
    for entry in fs::read_dir(&root)? {
        let entry = entry?;
        let dir_name = entry.file_name();
        let Some(dir_name) = dir_name.to_str() else {
            continue;
        };
        // DerivedData entries are "<ProjectName>-<hash>".
        let Some(dash) = dir_name.rfind('-') else {
            continue;
        };
        let name = &dir_name[..dash];
        let pattern = format!(
            "{}/{}/Build/Intermediates*/{name}.build/*/{name}.build/{name}-LinkMap*.txt",
            root.display(),
            dir_name,
        );
        for path in glob::glob(&pattern)?.filter_map(Result::ok) {
            let modified = fs::metadata(&path)
                .and_then(|m| m.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            found.push((modified, path.to_string_lossy().into_owned()));
        }
    }

    found.sort_by(|a, b| b.0.cmp(&a.0));
    Ok(found.into_iter().map(|(_, path)| path).collect())
}
