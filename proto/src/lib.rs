pub mod business {
	tonic::include_proto!("business");
}

pub mod ext;
