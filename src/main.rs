use clap::{Args, Parser, Subcommand};
use log::{error, info, warn};
use nocs_material::error::{NocsError, NocsResult};
use nocs_material::io::config::Config;
use nocs_material::io::document::{load_input, save_document};
use nocs_material::io::ply_export::save_ply;
use nocs_material::nocs::material::NocsShader;
use nocs_material::nocs::operator::{CreateNocsMaterial, Operator};
use nocs_material::scene::document::Scene;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Generate NOCS vertex colors and a visualization material for a mesh.
#[derive(Parser, Debug)]
#[command(name = "nocs", version)]
struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run "Create NOCS Material" on one object.
    Generate(GenerateArgs),
    /// Print objects, color attributes and materials of an input.
    Inspect {
        /// Input model (.obj) or scene document (.json).
        input: PathBuf,
    },
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Input model (.obj) or scene document (.json).
    input: PathBuf,

    /// Configuration file (TOML).
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Object to process; defaults to the first mesh object.
    #[arg(short, long)]
    object: Option<String>,

    /// Write the processed mesh as colored PLY.
    #[arg(long, value_name = "FILE")]
    ply: Option<PathBuf>,

    /// Write the whole scene as a JSON document.
    #[arg(long, value_name = "FILE")]
    document: Option<PathBuf>,

    /// Surface shader of the generated material.
    #[arg(long, value_enum)]
    shader: Option<NocsShader>,
}

fn main() -> Result<(), String> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .format_level(true)
        .init();

    let start_time = Instant::now();
    let result = match cli.command {
        Command::Generate(args) => generate(args),
        Command::Inspect { input } => inspect(&input),
    };

    if let Err(e) = result {
        error!("{e}");
        return Err(e.to_string());
    }
    info!("Done in {:?}", start_time.elapsed());
    Ok(())
}

fn generate(args: GenerateArgs) -> NocsResult<()> {
    let config = match &args.config {
        Some(path) => {
            info!("Loading config file: {}", path.display());
            Config::load(path)?
        }
        None => Config::default(),
    };

    let mut settings = config.nocs.to_settings();
    if let Some(shader) = args.shader {
        settings.shader = shader;
    }

    let mut scene = load_input(&args.input)?;
    match args.object.or(config.input.object) {
        Some(name) => scene.set_active(&name)?,
        None => {
            if scene.active().is_none() {
                scene.active_object = scene.first_mesh_object();
            }
        }
    }

    let operator = CreateNocsMaterial::new(settings);
    info!("Running '{}' ({})", operator.label(), operator.id());
    let report = operator.execute(&mut scene);
    report.log();
    if !report.is_finished() {
        return Err(NocsError::Cancelled(report.message));
    }

    let ply_path = args.ply.or_else(|| config.output.ply.map(PathBuf::from));
    if let Some(path) = ply_path {
        // The operator only finishes on a mesh object.
        if let Some(mesh) = scene.active().and_then(|o| o.mesh()) {
            save_ply(mesh, &operator.settings.normalize.attribute_name, path)?;
        }
    }

    let document_path = args
        .document
        .or_else(|| config.output.document.map(PathBuf::from));
    match document_path {
        Some(path) => save_document(&scene, path)?,
        None => warn!("No document output given; results were not saved"),
    }

    Ok(())
}

fn inspect(input: &Path) -> NocsResult<()> {
    let scene = load_input(input)?;
    print_scene(&scene);
    Ok(())
}

fn print_scene(scene: &Scene) {
    let active = scene.active().map(|o| o.name.as_str());
    info!("{} objects, {} materials", scene.objects.len(), scene.materials.len());

    for object in &scene.objects {
        let marker = if Some(object.name.as_str()) == active { "*" } else { " " };
        let Some(mesh) = object.mesh() else {
            info!("{marker} {} [{}]", object.name, object.kind());
            continue;
        };
        info!(
            "{marker} {} [{}] vertices: {}, faces: {}, loops: {}",
            object.name,
            object.kind(),
            mesh.vertices.len(),
            mesh.polygons.len(),
            mesh.loops.len()
        );
        if let Some(bb) = mesh.bounding_box() {
            info!(
                "    bounds: {:?} .. {:?}, center {:?}",
                bb.min,
                bb.max,
                bb.center()
            );
        }
        let active_attr = mesh.color_attributes.active().map(|a| a.name.as_str());
        for attr in mesh.color_attributes.iter() {
            let flag = if Some(attr.name.as_str()) == active_attr {
                " (active)"
            } else {
                ""
            };
            info!(
                "    color attribute '{}' {:?}, {} values{}",
                attr.name,
                attr.domain,
                attr.data.len(),
                flag
            );
        }
        for (slot, name) in mesh.material_slots.iter().enumerate() {
            info!("    slot {slot}: {name}");
        }
    }

    for material in &scene.materials {
        let nodes: Vec<&str> = material.node_tree.nodes.iter().map(|n| n.label()).collect();
        info!(
            "material '{}': nodes [{}], reads {:?}",
            material.name,
            nodes.join(", "),
            material.surface_attribute()
        );
    }
}
