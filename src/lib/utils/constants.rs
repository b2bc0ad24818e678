//! Constant value definitions to use across the whole program

pub const FORGE: &str = "forge";

pub const CONFIG_FILE_EXTENSION: &str = ".toml";
pub const COMPILATION_DATABASE: &str = "compile_commands.json";

/// The names of the `forge` specific directories, not their paths
pub mod dir_names {
    pub const DEFAULT_OUTPUT_DIR: &str = "out";
    pub const DEFAULT_DEPLOY_DIR: &str = "deploy";
    pub const DEFAULT_LIBS_DIR: &str = "libs";
    pub const INCLUDE: &str = "include";
    pub const LIB: &str = "lib";
}

/// Defaults for the shader transcoding post-compile hook
pub mod shaders {
    pub const DEFAULT_DIR: &str = "data/shaders";
    pub const DEFAULT_EXTENSIONS: [&str; 2] = [".vert", ".frag"];
    pub const DEFAULT_OUTPUT_SUFFIX: &str = ".spv";
    pub const DEFAULT_COMPILER_ARGS: [&str; 1] = ["-V"];
}

pub mod shells {
    pub const WIN_CMD: &str = "cmd";
    pub const POSIX_SH: &str = "sh";
}

pub mod debug_messages {
    pub const MAPPING_CFG_TO_MODEL: &str =
        "Proceeding to map the configuration file to the ForgeModel entity";
}

pub mod error_messages {
    pub const READ_CFG_FILE: &str = "Could not read the configuration file";
    pub const PARSE_CFG_FILE: &str = "Could not parse the configuration file";
    pub const NO_CFG_FILES_FOUND: &str = "No configuration files found for the project";
    pub const PROJECT_MODEL_MAPPING: &str = "Error building the project model";
    pub const FAILURE_GATHERING_PROJECT_ROOT_ABS_PATH: &str =
        "An unexpected error happened while resolving the absolute path to the current project root";
    pub const FAILED_BUILD_FOR_CFG_FILE: &str = "Failed to build the project for the config file";
    pub const FAILURE_RESOLVING_TARGETS: &str =
        "Failed to resolve the compiler and linker arguments of the targets";
    pub const FAILURE_CREATING_OUTPUT_DIR: &str = "Failed to create the output directory";
    pub const FAILURE_SAVING_COMPILATION_DB: &str = "Error saving the compilation database";
    pub const FAILURE_LOADING_BUILD_ENV: &str = "Failed to load the native build environment";
    pub const FAILURE_COMPILING_TARGETS: &str = "Failed to compile the declared targets";
    pub const FAILURE_STAGING_ASSETS: &str = "Failed to stage the declared data directories";
    pub const FAILURE_RUNNING_POST_COMPILE_HOOK: &str = "The post-compile hook failed";
    pub const FAILURE_DEPLOYING: &str = "Failed to assemble the deployable directory";
    pub const FAILURE_CLEANING: &str = "Failed to clean the build byproducts";
    pub const MISSING_ASSET_COMPILER: &str =
        "The shader transcoding post-compile hook requires the `toolchain.asset_compiler` path";
    pub const INVALID_DEPLOY_ENTRY: &str =
        "A deploy entry must declare exactly one of `path` or `target`";
    pub const ILL_FORMED_KEY_ON_ENV_VARS_PARSING: &str =
        "Ill-formed key while parsing the environment variables";
}
