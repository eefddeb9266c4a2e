use std::path::PathBuf;

use clap::Parser;

use objmesh::{find_invalid_reference, Object, Primitive};

/// Inspect an .obj file: what was parsed, whether it is consistent, and the
/// render buffers built from it.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Object file to load
    path: PathBuf,
    /// Keep polygons whole instead of splitting them into triangles
    #[arg(long)]
    keep_polygons: bool,
    /// Exit with an error when a face references a missing attribute
    #[arg(long)]
    strict: bool,
    /// Print every draw command
    #[arg(long)]
    commands: bool,
}

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let object = Object::parse(&cli.path).map_err(|e| format!("Failed to load object: {}", e))?;

    println!("{}", cli.path.display());
    println!("Vertices: {}", object.vertices.len());
    println!("Texture coordinates: {}", object.textures.len());
    println!("Normals: {}", object.normals.len());
    println!("Groups: {}", object.groups.len());
    for group in &object.groups {
        println!(
            "- {:?}: {} faces, arity {}",
            group.name,
            group.face_count(),
            group.arity()
        );
    }

    if let Some(invalid) = find_invalid_reference(&object) {
        let message = format!(
            "Invalid reference {:?} in face {} of group {}",
            invalid.reference, invalid.face, invalid.group
        );

        if cli.strict {
            return Err(message);
        }

        // building would panic on the bad reference
        println!("{}", message);
        return Ok(());
    }

    let mesh = object.render_mesh(!cli.keep_polygons);

    println!("--");
    println!("Render vertices: {}", mesh.vertices.len());
    println!("Render indices: {}", mesh.indices.len());
    println!("Draw commands: {}", mesh.commands.len());
    println!("Scale: {}", mesh.scale);

    if cli.commands {
        for command in &mesh.commands {
            let kind = match command.primitive {
                Primitive::Triangles => "triangles",
                Primitive::Fan => "fan",
            };
            println!("- {} [{}..{})", kind, command.start, command.end());
        }
    }

    return Ok(());
}
