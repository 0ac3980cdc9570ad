// Constants module for shared string constants

pub const API_URL: &str = "https://download.moodle.org/api";
pub const API_VERSION: &str = "1.3";
pub const PLUGLIST_ENDPOINT: &str = "pluglist.php";

pub const CACHE_KEY: &str = "pluglist.json";
/// Cached catalogs younger than this are served without a request.
pub const CACHE_TTL_SECS: u64 = 600;

pub const DEFAULT_NAMESPACE: &str = "moodledotorg";
pub const PACKAGE_TYPE_PREFIX: &str = "moodle";
pub const DIST_TYPE: &str = "zip";

pub const INSTALLER_PACKAGE: &str = "composer/installers";
pub const INSTALLER_MIN_VERSION: &str = "2.0";
pub const INSTALLER_PRETTY_CONSTRAINT: &str = "~2.0";

pub const EXTRA_INSTALLER_NAME: &str = "installer-name";
pub const EXTRA_DIST_MD5: &str = "moodleorg-distmd5";

/// Domain whose downloads count towards the throttle.
pub const ORIGIN_DOMAIN: &str = "moodle.org";
pub const DEFAULT_THROTTLE_COUNT: u32 = 12;
pub const DEFAULT_THROTTLE_SLEEP_SECS: u64 = 12;

pub const REPOSITORY_NAME: &str = "MoodleOrg repository (https://download.moodle.org)";
