use common::records::ActionRecord;
use common::windows::{Actions, TaskJob};

/// A `Job` file always carries exactly one command line
pub(crate) fn job_actions(job: &TaskJob) -> Vec<ActionRecord> {
    vec![ActionRecord::Exec {
        command: job.application_name.clone(),
        arguments: Some(job.parameters.clone()),
        working_directory: Some(job.working_directory.clone()),
    }]
}

/// Map every action of a Task XML tree
pub(crate) fn xml_actions(actions: &Actions) -> Vec<ActionRecord> {
    let mut records = Vec::new();

    for exec in &actions.exec {
        records.push(ActionRecord::Exec {
            command: exec.command.clone(),
            arguments: exec.arguments.clone(),
            working_directory: exec.working_directory.clone(),
        });
    }
    for com in &actions.com_handler {
        records.push(ActionRecord::ComHandler {
            class_id: com.class_id.clone(),
            data: com.data.clone(),
        });
    }
    for email in &actions.send_email {
        records.push(ActionRecord::SendEmail {
            server: email.server.clone(),
            subject: email.subject.clone(),
            to: email.to.clone(),
            cc: email.cc.clone(),
            bcc: email.bcc.clone(),
            reply_to: email.reply_to.clone(),
            from: email.from.clone(),
            headers: email.header_fields.clone(),
            body: email.body.clone(),
            attachments: email.attachment.clone(),
        });
    }
    for message in &actions.show_message {
        records.push(ActionRecord::ShowMessage {
            title: message.title.clone(),
            body: message.body.clone(),
        });
    }

    records
}
