pub mod availability_dto;
