use std::sync::Arc;

use binary_helper::global::{GlobalConfig, GlobalConfigProvider, GlobalCtx};

use crate::config::BusinessConfig;
use crate::store::RecordStore;

pub trait ApiState {
	fn record_store(&self) -> &Arc<dyn RecordStore>;
}

pub trait ApiGlobal: GlobalCtx + GlobalConfigProvider<BusinessConfig> + GlobalConfig + ApiState + Send + Sync + 'static {}

impl<T> ApiGlobal for T where
	T: GlobalCtx + GlobalConfigProvider<BusinessConfig> + GlobalConfig + ApiState + Send + Sync + 'static
{
}
