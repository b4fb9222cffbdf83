use walkdir::WalkDir;

const PROTO_DIR: &str = env!("CARGO_MANIFEST_DIR");

fn main() {
	let mut config = prost_build::Config::new();

	config.protoc_arg("--experimental_allow_proto3_optional");

	let proto_files = WalkDir::new(PROTO_DIR)
		.follow_links(true)
		.into_iter()
		.filter_map(|e| e.ok())
		.filter(|e| e.path().extension() == Some(std::ffi::OsStr::new("proto")))
		.map(|e| {
			let path = e.path().display().to_string();
			println!("cargo:rerun-if-changed={}", path);
			path
		})
		.collect::<Vec<_>>();

	tonic_build::configure()
		.build_client(true)
		.build_server(true)
		.compile_with_config(config, &proto_files, &[PROTO_DIR])
		.expect("failed to compile protos");
}
