use anyhow::Result;

use slangbuild_lib::BuildConfig;
use slangbuild_lib::platform::platform_triple;

use crate::output::print_stat;

pub fn cmd_info(config: &BuildConfig) -> Result<()> {
  println!("System:");
  match platform_triple() {
    Some(triple) => print_stat("Platform", &triple),
    _ => println!("Could not detect platform."),
  }

  let slang_dir = dunce::canonicalize(&config.slang_dir).unwrap_or_else(|_| config.slang_dir.clone());
  let arch = config.osx_arch.as_ref().map_or_else(|| "-".to_string(), ToString::to_string);

  println!();
  println!("Configuration:");
  print_stat("Target", config.os.as_str());
  print_stat("Arch", &arch);
  print_stat("Preset", &config.preset);
  print_stat("Build type", &config.build_type);
  print_stat("Slang dir", &slang_dir.display().to_string());
  print_stat("Output dir", &config.output_dir.display().to_string());
  print_stat("CMake", &config.cmake.display().to_string());
  print_stat(
    "Configured",
    if config.cache_marker().is_file() { "yes" } else { "no" },
  );

  Ok(())
}
