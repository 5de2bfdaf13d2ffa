//! hullbox command-line front end.
//!
//! Reads a Wavefront OBJ, builds collision geometry for it and writes the
//! result next to it (or into `--out-dir`).
use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use hullbox::config::{FrameCorrection, Preferences};
use hullbox::decompose::CoacdProcess;
use hullbox::errors::SessionError;
use hullbox::io::obj::{read_obj, write_obj};
use hullbox::mesh::{ObjectId, SceneObject};
use hullbox::session::{CollisionSession, MeshObjectRequest, SceneHost};
use hullbox::{Mesh, Transform};
use std::path::{Path, PathBuf};
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(author, version, about = "Collision hulls and oriented bounding boxes for Source-engine export")]
struct Args {
    /// Log per-candidate search detail
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Preferences file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fit a minimum-volume oriented bounding box
    Obb {
        /// Input mesh
        mesh: PathBuf,
        /// Output OBJ (default: <mesh>_collision.obj next to the input)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Also write the box as ASCII STL
        #[arg(long)]
        stl: Option<PathBuf>,
        /// Keep the fitted orientation instead of aligning to the object frame
        #[arg(long)]
        preserve_orientation: bool,
    },
    /// Run the configured CoACD executable and collect its convex parts
    Decompose {
        /// Input mesh
        mesh: PathBuf,
        /// Directory for the collision OBJ
        #[arg(long)]
        out_dir: PathBuf,
    },
}

/// Scene host that stores every created object as an OBJ file.
struct FileHost {
    out_dir: PathBuf,
    next_id: u64,
    written: Vec<(PathBuf, Mesh)>,
}

impl FileHost {
    fn new(out_dir: impl Into<PathBuf>) -> Self {
        FileHost {
            out_dir: out_dir.into(),
            next_id: 1_000,
            written: Vec::new(),
        }
    }
}

impl SceneHost for FileHost {
    fn create_mesh_object(&mut self, request: MeshObjectRequest) -> Result<ObjectId, SessionError> {
        let path = self.out_dir.join(format!("{}.obj", request.name));
        let world = request.mesh.transformed(&request.transform);
        write_obj(&path, &world, Some(&request.name))?;
        info!(path = %path.display(), faces = world.faces.len(), "wrote collision object");
        self.written.push((path, world));
        self.next_id += 1;
        Ok(ObjectId(self.next_id))
    }
}

fn load_object(path: &Path) -> Result<SceneObject> {
    let mesh = read_obj(path).with_context(|| format!("reading {}", path.display()))?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("mesh")
        .to_string();
    Ok(SceneObject::new(ObjectId(1), name, mesh, Transform::identity()))
}

fn load_preferences(path: Option<&Path>) -> Result<Preferences> {
    match path {
        Some(path) => Preferences::load(path).with_context(|| format!("loading {}", path.display())),
        None => Ok(Preferences::default()),
    }
}

fn report(session: &mut CollisionSession) -> Result<()> {
    let diagnostics = session.take_diagnostics();
    for d in &diagnostics {
        warn!(object = %d.name, "{}", d.message);
    }
    if let Some(first) = diagnostics.first() {
        bail!("{}: {}", first.name, first.message);
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut prefs = load_preferences(args.config.as_deref())?;

    match args.command {
        Command::Obb {
            mesh,
            out,
            stl,
            preserve_orientation,
        } => {
            if preserve_orientation {
                prefs.fit.frame_correction = FrameCorrection::Preserve;
            }
            let object = load_object(&mesh)?;
            let out_dir = match &out {
                Some(out) => out.parent().map(Path::to_path_buf).unwrap_or_default(),
                None => mesh.parent().map(Path::to_path_buf).unwrap_or_default(),
            };
            let mut host = FileHost::new(out_dir);
            let mut session = CollisionSession::new(prefs);
            session.create_obbs(&mut host, std::slice::from_ref(&object));
            report(&mut session)?;

            let Some((written, box_mesh)) = host.written.pop() else {
                bail!("no collision box was produced");
            };
            if let Some(out) = out {
                if out != written {
                    std::fs::rename(&written, &out)
                        .with_context(|| format!("moving {} to {}", written.display(), out.display()))?;
                }
            }
            if let Some(stl) = stl {
                std::fs::write(&stl, box_mesh.to_stl_ascii(&object.name))
                    .with_context(|| format!("writing {}", stl.display()))?;
            }
        },
        Command::Decompose { mesh, out_dir } => {
            std::fs::create_dir_all(&out_dir)
                .with_context(|| format!("creating {}", out_dir.display()))?;
            let decomposer = CoacdProcess::from_preferences(&prefs)?;
            let object = load_object(&mesh)?;
            let mut host = FileHost::new(out_dir);
            let mut session = CollisionSession::new(prefs);
            session.create_collisions(&mut host, &decomposer, std::slice::from_ref(&object));
            report(&mut session)?;
        },
    }

    Ok(())
}
