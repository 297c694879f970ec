use crate::logger::warn;
use std::collections::HashMap;
use std::convert::AsRef;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

#[allow(dead_code)]
#[derive(Debug)]
pub enum SettingLoadError {
    IncorrectFormat,
    InvalidType,
    InvalidValue,
    IoError(std::io::Error),
}
impl From<std::io::Error> for SettingLoadError {
    fn from(error: std::io::Error) -> Self { SettingLoadError::IoError(error) }
}
impl From<std::num::ParseIntError> for SettingLoadError {
    fn from(_: std::num::ParseIntError) -> Self { SettingLoadError::InvalidValue }
}
impl From<std::num::ParseFloatError> for SettingLoadError {
    fn from(_: std::num::ParseFloatError) -> Self { SettingLoadError::InvalidValue }
}
impl From<std::str::ParseBoolError> for SettingLoadError {
    fn from(_: std::str::ParseBoolError) -> Self { SettingLoadError::InvalidValue }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SettingValue {
    String(String),
    F32(f32),
    I32(i32),
    Bool(bool),
}

macro_rules! stringy_enum {
    (pub enum $name:ident {
        $($value:ident($display:expr) = $default:expr,)+
    }) => {
        #[derive(Copy, Clone, Debug)]
        pub enum $name {
            $($value,)+
        }

        impl $name {
            pub fn to_string(value: $name) -> &'static str {
                match value {
                    $($name::$value => $display,)+
                }
            }

            pub fn get_default(value: $name) -> SettingValue {
                match value {
                    $($name::$value => $default,)+
                }
            }
        }
    };
}

stringy_enum! {
    pub enum SettingNames {
        LoggingLevel("logging_level") = SettingValue::String(String::from("info")),
        FrameIntervalMs("frame_interval_ms") = SettingValue::I32(16),
        GradientSpeed("gradient_speed") = SettingValue::F32(0.4),
        BuildingScrollSpeed("building_scroll_speed") = SettingValue::F32(4.),
        SpriteScrollSpeed("sprite_scroll_speed") = SettingValue::F32(17.),
        //Offset wrap period, keep it equal to the sprite width or the strip jumps on every wrap
        SpriteTilePeriod("sprite_tile_period") = SettingValue::F32(910.),
        SpritePath("sprite_path") = SettingValue::String(String::from("./Assets/palms.png")),
        FontPath("font_path") = SettingValue::String(String::from("./Assets/Roboto-Regular.ttf")),
        DebugOverlay("debug_overlay") = SettingValue::Bool(cfg!(debug_assertions)),
        Scanlines("scanlines") = SettingValue::Bool(true),
        RecycleResample("recycle_resample") = SettingValue::Bool(false),
        SceneSeed("scene_seed") = SettingValue::I32(-1),
    }
}

macro_rules! settings_get {
    ($name:ident, $ty:ty, $setting:path) => {
        pub fn $name(&self, setting: SettingNames) -> $ty {
            let key = SettingNames::to_string(setting);
            if let Some(f) = self.settings.get(key) {
                if let $setting(value) = f {
                    return value.clone();
                }
                warn!("Attempted to retrieve setting {} but type expected type {}", key, stringify!($ty));
            }
            if let $setting(value) = SettingNames::get_default(setting) {
                return value;
            }
            panic!("Accessed setting using incorrect type");
        }
    };
}

type SettingsResult<T> = Result<T, SettingLoadError>;
#[derive(Clone)]
pub struct SettingsFile {
    settings: HashMap<String, SettingValue>,
    path: PathBuf,
    last_write: SystemTime,
    rejected_write: Option<SystemTime>,
}
impl SettingsFile {
    pub fn default() -> SettingsFile {
        SettingsFile {
            settings: HashMap::default(),
            path: PathBuf::default(),
            last_write: SystemTime::now(),
            rejected_write: None,
        }
    }

    /// Settings that only use defaults but will pick up the file at `path` once it exists
    pub fn watching<P: AsRef<Path>>(path: P) -> SettingsFile {
        SettingsFile { path: path.as_ref().to_path_buf(), last_write: SystemTime::UNIX_EPOCH, ..SettingsFile::default() }
    }

    settings_get!(get_f32, f32, SettingValue::F32);
    settings_get!(get_i32, i32, SettingValue::I32);
    settings_get!(get_str, String, SettingValue::String);
    settings_get!(get_bool, bool, SettingValue::Bool);
}

/// Loads settings from a file path
pub fn load_settings<P: AsRef<Path>>(path: P) -> SettingsResult<SettingsFile> {
    let path_buf = path.as_ref().to_path_buf();
    let data = std::fs::read_to_string(&path_buf)?;
    let last_write = std::fs::metadata(&path_buf)?.modified()?;
    let mut settings = SettingsFile { settings: HashMap::new(), path: path_buf, last_write, rejected_write: None };

    populate_settings(&mut settings, &data)?;

    Ok(settings)
}

/// Checks for and loads any updates to the settings file
/// Returns `true` when new values were read
pub fn update_settings(settings: &mut SettingsFile) -> SettingsResult<bool> {
    //We log an error if the file isnt found in load_settings
    //Since this is already logged we dont need to get logging it every frame
    if settings.path.as_path().exists() {
        let last_write = std::fs::metadata(&settings.path)?.modified()?;

        //A file that failed to parse is not read again until it is written again
        if last_write > settings.last_write && settings.rejected_write != Some(last_write) {
            let data = std::fs::read_to_string(&settings.path)?;

            //Values are only swapped in once the whole file parsed
            let mut updated = SettingsFile::watching(&settings.path);
            if let Err(e) = populate_settings(&mut updated, &data) {
                settings.rejected_write = Some(last_write);
                return Err(e);
            }

            settings.settings = updated.settings;
            settings.last_write = last_write;
            settings.rejected_write = None;
            return Ok(true);
        }
    }

    Ok(false)
}

pub(crate) fn populate_settings(settings: &mut SettingsFile, data: &str) -> SettingsResult<()> {
    for line in data.lines() {
        let line = line.trim();

        //# denotes a comment
        if line.starts_with('#') || line.is_empty() {
            continue;
        }

        let (key, type_value) = line.split_at(line.find(':').ok_or(SettingLoadError::IncorrectFormat)?);
        let (ty, value) = type_value.split_at(type_value.find('=').ok_or(SettingLoadError::IncorrectFormat)?);

        //First character will be : or =, dont include that
        let value = value[1..].trim();
        let value = match ty[1..].trim() {
            "f32" => SettingValue::F32(value.parse::<f32>()?),
            "i32" => SettingValue::I32(value.parse::<i32>()?),
            "str" => SettingValue::String(String::from(value)),
            "bool" => SettingValue::Bool(value.parse::<bool>()?),
            _ => return Err(SettingLoadError::InvalidType),
        };
        settings.settings.insert(String::from(key.trim()), value);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(data: &str) -> SettingsResult<SettingsFile> {
        let mut settings = SettingsFile::default();
        populate_settings(&mut settings, data)?;
        Ok(settings)
    }

    #[test]
    fn typed_values_are_read() {
        let settings = parse(
            "# scene tuning\n\
             gradient_speed: f32 = 1.5\n\
             frame_interval_ms: i32 = 33\n\
             sprite_path: str = ./Assets/other.png\n\
             debug_overlay: bool = true\n",
        )
        .unwrap();

        assert_eq!(settings.get_f32(SettingNames::GradientSpeed), 1.5);
        assert_eq!(settings.get_i32(SettingNames::FrameIntervalMs), 33);
        assert_eq!(settings.get_str(SettingNames::SpritePath), "./Assets/other.png");
        assert!(settings.get_bool(SettingNames::DebugOverlay));
    }

    #[test]
    fn missing_values_use_defaults() {
        let settings = parse("").unwrap();
        assert_eq!(settings.get_f32(SettingNames::SpriteTilePeriod), 910.);
        assert_eq!(settings.get_f32(SettingNames::SpriteScrollSpeed), 17.);
        assert_eq!(settings.get_i32(SettingNames::SceneSeed), -1);
        assert_eq!(settings.get_str(SettingNames::LoggingLevel), "info");
    }

    #[test]
    fn wrong_type_falls_back_to_default() {
        let settings = parse("building_scroll_speed: str = fast").unwrap();
        assert_eq!(settings.get_f32(SettingNames::BuildingScrollSpeed), 4.);
    }

    #[test]
    fn malformed_lines_are_rejected() {
        assert!(matches!(parse("gradient_speed = 1"), Err(SettingLoadError::IncorrectFormat)));
        assert!(matches!(parse("gradient_speed: f32 1"), Err(SettingLoadError::IncorrectFormat)));
        assert!(matches!(parse("gradient_speed: f64 = 1"), Err(SettingLoadError::InvalidType)));
        assert!(matches!(parse("gradient_speed: f32 = quick"), Err(SettingLoadError::InvalidValue)));
        assert!(matches!(parse("scanlines: bool = yes"), Err(SettingLoadError::InvalidValue)));
    }

    #[test]
    fn changed_file_is_reloaded() {
        let path = std::env::temp_dir().join(format!("synthwave-settings-{}.settings", std::process::id()));
        std::fs::write(&path, "gradient_speed: f32 = 2\n").unwrap();

        let mut settings = SettingsFile::watching(&path);
        assert_eq!(settings.get_f32(SettingNames::GradientSpeed), 0.4);

        assert!(update_settings(&mut settings).unwrap());
        assert_eq!(settings.get_f32(SettingNames::GradientSpeed), 2.);

        //Unchanged file is not read again
        assert!(!update_settings(&mut settings).unwrap());

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn failed_reload_keeps_previous_values() {
        let path = std::env::temp_dir().join(format!("synthwave-bad-settings-{}.settings", std::process::id()));
        std::fs::write(&path, "frame_interval_ms: i32 = 33\n").unwrap();

        let mut settings = SettingsFile::watching(&path);
        assert!(update_settings(&mut settings).unwrap());
        assert_eq!(settings.get_i32(SettingNames::FrameIntervalMs), 33);

        //Make sure the rewrite gets a newer modification time
        let written = settings.last_write;
        std::fs::write(&path, "frame_interval_ms: i32 = 50\ngradient_speed: f32 = oops\n").unwrap();
        let file = std::fs::OpenOptions::new().write(true).open(&path).unwrap();
        file.set_modified(written + std::time::Duration::from_secs(10)).unwrap();
        drop(file);

        assert!(matches!(update_settings(&mut settings), Err(SettingLoadError::InvalidValue)));
        assert_eq!(settings.get_i32(SettingNames::FrameIntervalMs), 33);
        assert_eq!(settings.get_f32(SettingNames::GradientSpeed), 0.4);

        //The broken file is reported once
        assert!(!update_settings(&mut settings).unwrap());
        assert_eq!(settings.get_i32(SettingNames::FrameIntervalMs), 33);

        //Fixing the file applies all of it
        std::fs::write(&path, "frame_interval_ms: i32 = 50\ngradient_speed: f32 = 1\n").unwrap();
        let file = std::fs::OpenOptions::new().write(true).open(&path).unwrap();
        file.set_modified(written + std::time::Duration::from_secs(20)).unwrap();
        drop(file);

        assert!(update_settings(&mut settings).unwrap());
        assert_eq!(settings.get_i32(SettingNames::FrameIntervalMs), 50);
        assert_eq!(settings.get_f32(SettingNames::GradientSpeed), 1.);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = load_settings("./does-not-exist.settings");
        assert!(matches!(result, Err(SettingLoadError::IoError(_))));
    }
}
