use std::cell::RefCell;
use std::rc::Rc;

/// A game the browser can launch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rom {
    /// Color title (`.gbc`) rather than original hardware.
    pub is_gbc: bool,
    /// Display name: the file name without extension.
    pub name: String,
    pub full_path: String,
    /// `full_path` with `/` separators.
    pub full_path_norm: String,
    /// Battery save location for this ROM.
    pub save_path: String,
}

impl Rom {
    /// Describe the ROM at `full_path`, saving into `save_dir`.
    pub fn from_path(full_path: &str, save_dir: &str) -> Self {
        let full_path_norm = full_path.replace('\\', "/");
        let file_name = full_path_norm
            .rsplit('/')
            .next()
            .unwrap_or(full_path_norm.as_str());
        let (stem, ext) = match file_name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => (stem, ext),
            _ => (file_name, ""),
        };
        let save_dir = save_dir.replace('\\', "/");
        let save_path = format!("{}/{}.srm", save_dir.trim_end_matches('/'), stem);

        Self {
            is_gbc: ext.eq_ignore_ascii_case("gbc"),
            name: stem.to_string(),
            full_path: full_path.to_string(),
            full_path_norm: full_path_norm.clone(),
            save_path,
        }
    }
}

/// Host-owned ROM collection shared with list widgets, which only read it.
pub type RomShelf = Rc<RefCell<Vec<Rom>>>;

/// Wrap a collection for sharing with list widgets.
pub fn shelf(roms: Vec<Rom>) -> RomShelf {
    Rc::new(RefCell::new(roms))
}

/// Sort by display name, ignoring case.
pub fn sort_by_name(roms: &mut [Rom]) {
    roms.sort_by_cached_key(|r| r.name.to_lowercase());
}
