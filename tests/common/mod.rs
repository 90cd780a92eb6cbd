//! Shared fixtures for integration tests.
//!
//! Each test gets its own temporary directory holding a small paper catalogue, so
//! loader tests can rewrite or remove the file without affecting each other.

use rstest::fixture;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use vla_table::{Dataset, TableConfig, TableController};

/// Header row in the layout the published catalogue uses.
pub const HEADER: &str = "カテゴリ,略称,タイトル,学会,Paper URL,Website URL,タスク,Domain,ロボット,Training,Evaluation,Modality,Dataset,Backbone,Action Generation";

/// Six papers spread over several categories, out of priority order on purpose.
pub const SAMPLE_ROWS: &[&str] = &[
    "Policy,RT-2,Vision-Language-Action Models Transfer Web Knowledge to Robotic Control,CoRL,https://arxiv.org/abs/2307.15818,https://robotics-transformer2.github.io,\"Manipulation, Pick and Place\",Tabletop,Mobile Manipulator,Co-fine-tuning,Real,\"Vision, Language\",RT-1 Data,PaLI-X,Tokenized",
    "Review,Survey-VLA,A Survey on Vision-Language-Action Models,arXiv,https://arxiv.org/abs/2405.14093,,Survey,,,,,\"Vision, Language\",,,",
    "\"3D, Policy\",3D-VLA,A 3D Vision-Language-Action Generative World Model,ICML,https://arxiv.org/abs/2403.09631,https://vis-www.cs.umass.edu/3dvla,Manipulation,Tabletop,Franka,Pretraining,Simulation,\"Vision, Language, Depth\",3D Data,BLIP-2,Diffusion",
    "Planning,SayCan,Do As I Can Not As I Say,CoRL,https://arxiv.org/abs/2204.01691,https://say-can.github.io,Navigation,Kitchen,Mobile Manipulator,Imitation,Real,Language,Everyday Robots,PaLM,Skill Selection",
    "Policy,Octo,An Open-Source Generalist Robot Policy,RSS,https://arxiv.org/abs/2405.12213,https://octo-models.github.io,\"Manipulation, Pick and Place\",Tabletop,\"Franka, WidowX\",Pretraining,Real,Vision,Open X-Embodiment,Transformer,Diffusion",
    "End-to-End,RT-1,Robotics Transformer for Real-World Control at Scale,RSS,https://arxiv.org/abs/2212.06817,https://robotics-transformer1.github.io,Manipulation,Kitchen,Mobile Manipulator,Imitation,Real,\"Vision, Language\",RT-1 Data,EfficientNet,Tokenized",
];

/// Full CSV text of the sample catalogue.
pub fn sample_csv() -> String {
    let mut text = String::from(HEADER);
    for row in SAMPLE_ROWS {
        text.push('\n');
        text.push_str(row);
    }
    text.push('\n');
    text
}

/// A temporary directory removed when dropped.
#[allow(dead_code)] // Methods used across different integration test crates
pub struct TempWorkspace {
    _temp: TempDir,
    root: PathBuf,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl TempWorkspace {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        Self { _temp: temp, root }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Writes `content` to `relative_path`, creating parent directories.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let path = self.root.join(relative_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }
}

/// A workspace holding `papers.csv` plus the config pointing at it.
#[allow(dead_code)]
pub struct Catalogue {
    pub workspace: TempWorkspace,
    pub csv_path: PathBuf,
    pub config: TableConfig,
}

#[allow(dead_code)]
impl Catalogue {
    /// Loads the catalogue and builds a controller over it.
    pub async fn controller(&self) -> TableController {
        let report = Dataset::load(&self.csv_path, &self.config.category_priority)
            .await
            .expect("sample catalogue should load");
        TableController::new(report.dataset, &self.config)
    }
}

#[fixture]
pub fn catalogue() -> Catalogue {
    let workspace = TempWorkspace::new();
    let csv_path = workspace.create_file("papers.csv", &sample_csv());
    let config = TableConfig {
        data_path: csv_path.clone(),
        ..TableConfig::default()
    };
    Catalogue {
        workspace,
        csv_path,
        config,
    }
}
