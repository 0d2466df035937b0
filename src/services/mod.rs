pub mod favorites_service;
pub mod lead_service;
pub mod proposal_service;
pub mod tenant_service;
