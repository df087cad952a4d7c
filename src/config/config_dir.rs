use std::{fs::File, io::Read, path::PathBuf};

use tracing::debug;

use super::error::ConfigResult;

/// Environment override for the config location, checked before any
/// well-known path.
pub const CONFIG_ENV: &str = "ESCUCHA_CONFIG";

pub fn find_config_file(use_local: bool) -> PathBuf {
    let app_name = crate::APPLICATION_NAME;

    if let Some(explicit) = std::env::var_os(CONFIG_ENV) {
        return PathBuf::from(explicit);
    }

    if use_local {
        return PathBuf::from("./config.toml");
    }

    #[cfg(unix)]
    let path = std::env::var_os("HOME");
    #[cfg(windows)]
    let path = std::env::var_os("APPDATA");

    #[cfg(any(unix, windows))]
    if let Some(app_path) = path {
        let mut path = PathBuf::from(app_path);

        if cfg!(unix) {
            path = path.join(".config");
        }

        path = path.join(app_name).join("config.toml");

        if path.exists() {
            return path;
        }
    }

    PathBuf::from("./config.toml")
}

pub fn read_config(use_local: bool) -> ConfigResult<String> {
    let filename = find_config_file(use_local);

    tracing::trace!("looking for config at: {}", filename.display());
    if !filename.exists() {
        return Err(crate::config::error::ConfigError::ConfigNotFound);
    }

    debug!("using {} as configuration file", filename.display());

    let mut fd = File::open(filename)?;
    let mut buf = String::new();
    fd.read_to_string(&mut buf)?;

    Ok(buf)
}

#[cfg(test)]
mod test {
    use std::env;
    use std::fs;
    use std::path::PathBuf;

    use super::*;

    // one test owns every env lookup; parallel siblings would race
    #[test]
    fn test_find_config_file_env_and_home() {
        // local mode without an override: the working directory
        assert_eq!(find_config_file(true), PathBuf::from("./config.toml"));

        // explicit override wins over everything
        let temp_dir = tempfile::tempdir().unwrap();
        let override_file = temp_dir.path().join("elsewhere.toml");
        fs::write(&override_file, "dummy = true").unwrap();

        unsafe {
            env::set_var(CONFIG_ENV, &override_file);
        }
        assert_eq!(find_config_file(true), override_file);
        assert_eq!(find_config_file(false), override_file);

        // override points nowhere: read reports not-found
        unsafe {
            env::set_var(CONFIG_ENV, temp_dir.path().join("nope.toml"));
        }
        assert!(matches!(
            read_config(true),
            Err(crate::config::ConfigError::ConfigNotFound)
        ));

        unsafe {
            env::remove_var(CONFIG_ENV);
        }

        // without the override, the per-user location is used
        let fake_config = temp_dir
            .path()
            .join(".config")
            .join(crate::APPLICATION_NAME);
        fs::create_dir_all(&fake_config).unwrap();
        let config_file = fake_config.join("config.toml");
        fs::write(&config_file, "dummy = true").unwrap();

        #[cfg(unix)]
        unsafe {
            env::set_var("HOME", temp_dir.path());
        }

        #[cfg(windows)]
        unsafe {
            env::set_var("APPDATA", temp_dir.path());
        }

        assert_eq!(find_config_file(false), config_file);
    }
}
