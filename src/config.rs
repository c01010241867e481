use std::path::Path;

use anyhow::anyhow;
use config::{Config, File};
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// Extension a file must carry to count as a wiki page
    pub wiki_page_extension: String,
    /// Directory-name suffix that marks a wiki-home root
    pub wiki_home_suffix: String,
    /// Whether corrected plain links keep their markdown extension
    pub include_md_extension_in_links: bool,
}

impl Settings {
    pub fn new(root_dir: &Path) -> anyhow::Result<Settings> {
        let expanded = shellexpand::tilde("~/.config/linkmark/settings");
        let settings = Config::builder()
            .add_source(File::with_name(&expanded).required(false))
            .add_source(
                File::with_name(&format!(
                    "{}/.linkmark",
                    root_dir
                        .to_str()
                        .ok_or(anyhow!("Can't convert root_dir to str"))?
                ))
                .required(false),
            )
            .set_default("wiki_page_extension", "md")?
            .set_default("wiki_home_suffix", ".wiki")?
            .set_default("include_md_extension_in_links", false)?
            .build()
            .map_err(|err| anyhow!("Build err: {err}"))?;

        let settings = settings.try_deserialize::<Settings>()?;

        anyhow::Ok(settings)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            wiki_page_extension: "md".to_string(),
            wiki_home_suffix: ".wiki".to_string(),
            include_md_extension_in_links: false,
        }
    }
}
