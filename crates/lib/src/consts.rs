/// Config file picked up from the working directory when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = "slangbuild.toml";

/// Prefix of the environment variables that override configuration.
pub const ENV_PREFIX: &str = "SLANGBUILD_";

/// Directory under the Slang checkout that holds the CMake build tree.
pub const BUILD_DIR_NAME: &str = "build";

/// CMake writes this file once a build tree has been configured.
pub const CACHE_MARKER: &str = "CMakeCache.txt";

pub const DEFAULT_SLANG_DIR: &str = "slang";
pub const DEFAULT_OUTPUT_DIR: &str = "bin";
pub const DEFAULT_CMAKE: &str = "cmake";
pub const DEFAULT_PRESET: &str = "default";
pub const WINDOWS_PRESET: &str = "vs2022";
pub const DEFAULT_BUILD_TYPE: &str = "releaseWithDebugInfo";

/// Cache variables passed to every configure run. Only the shared compiler library is built.
pub const FEATURE_FLAGS: &[&str] = &[
  "-DSLANG_ENABLE_GFX=FALSE",
  "-DSLANG_ENABLE_SLANGI=FALSE",
  "-DSLANG_ENABLE_SLANGRT=FALSE",
  "-DSLANG_ENABLE_TESTS=FALSE",
  "-DSLANG_ENABLE_EXAMPLES=FALSE",
  "-DSLANG_LIB_TYPE=SHARED",
];

/// Name suffixes of split debug-symbol files, which are never declared as artifacts.
pub const DEBUG_SYMBOL_SUFFIXES: &[&str] = &[".debug", ".dbg", ".dwarf"];
