pub mod receive_message;
